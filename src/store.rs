// src/store.rs
//
// Durable per-(user, lesson) progress. The compound unique index created in
// the migrations is the only duplicate guard: the upsert is a single
// `INSERT .. ON CONFLICT .. DO UPDATE .. RETURNING` statement, so two
// concurrent submissions for the same pair serialize in the storage layer
// rather than through in-process locking.

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::progress::ProgressRecord;

/// Whether the upsert created a new record or overwrote an existing one.
/// Drives the 201/200 status distinction.
#[derive(Debug)]
pub enum UpsertOutcome {
    Created(ProgressRecord),
    Updated(ProgressRecord),
}

impl UpsertOutcome {
    pub fn created(&self) -> bool {
        matches!(self, UpsertOutcome::Created(_))
    }

    pub fn into_record(self) -> ProgressRecord {
        match self {
            UpsertOutcome::Created(record) | UpsertOutcome::Updated(record) => record,
        }
    }
}

/// Creates or overwrites the progress record for (user, lesson).
///
/// `completed_at` is written inside the statement: set when this write is
/// the first to mark the pair completed, untouched otherwise. Re-submitting
/// identical arguments therefore leaves it unchanged.
pub async fn upsert(
    pool: &SqlitePool,
    user_id: i64,
    lesson_id: &str,
    score: i64,
    completed: bool,
    progress: i64,
) -> Result<UpsertOutcome, AppError> {
    // Advisory only: decides the Created/Updated status. Correctness against
    // duplicate rows rests on the unique index inside the upsert below.
    let existing: Option<i64> =
        sqlx::query_scalar("SELECT id FROM progress WHERE user_id = ?1 AND lesson_id = ?2")
            .bind(user_id)
            .bind(lesson_id)
            .fetch_optional(pool)
            .await?;

    let now = Utc::now();

    let record = sqlx::query_as::<_, ProgressRecord>(
        r#"
        INSERT INTO progress
            (user_id, lesson_id, completed, score, progress, completed_at, created_at, updated_at)
        VALUES
            (?1, ?2, ?3, ?4, ?5, CASE WHEN ?3 THEN ?6 ELSE NULL END, ?6, ?6)
        ON CONFLICT (user_id, lesson_id) DO UPDATE SET
            completed = excluded.completed,
            score = excluded.score,
            progress = excluded.progress,
            completed_at = CASE
                WHEN excluded.completed AND progress.completed_at IS NULL THEN excluded.updated_at
                ELSE progress.completed_at
            END,
            updated_at = excluded.updated_at
        RETURNING id, user_id, lesson_id, completed, score, progress,
                  completed_at, created_at, updated_at
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .bind(completed)
    .bind(score)
    .bind(progress)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to upsert progress: {:?}", e);
        AppError::from(e)
    })?;

    Ok(if existing.is_some() {
        UpsertOutcome::Updated(record)
    } else {
        UpsertOutcome::Created(record)
    })
}

/// All progress records for a user, most recently updated first.
pub async fn list(pool: &SqlitePool, user_id: i64) -> Result<Vec<ProgressRecord>, AppError> {
    let records = sqlx::query_as::<_, ProgressRecord>(
        r#"
        SELECT id, user_id, lesson_id, completed, score, progress,
               completed_at, created_at, updated_at
        FROM progress
        WHERE user_id = ?1
        ORDER BY updated_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch progress list: {:?}", e);
        AppError::from(e)
    })?;

    Ok(records)
}

/// Progress for a single lesson; NotFound if the user never submitted it.
pub async fn get(
    pool: &SqlitePool,
    user_id: i64,
    lesson_id: &str,
) -> Result<ProgressRecord, AppError> {
    let record = sqlx::query_as::<_, ProgressRecord>(
        r#"
        SELECT id, user_id, lesson_id, completed, score, progress,
               completed_at, created_at, updated_at
        FROM progress
        WHERE user_id = ?1 AND lesson_id = ?2
        "#,
    )
    .bind(user_id)
    .bind(lesson_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| {
        tracing::error!("Failed to fetch progress: {:?}", e);
        AppError::from(e)
    })?;

    record.ok_or_else(|| AppError::NotFound("Progress not found for this lesson".to_string()))
}

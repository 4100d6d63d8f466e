// src/models/progress.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::catalog;

/// Represents the 'progress' table in the database.
/// One row per (user, lesson), enforced by a compound unique index.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: i64,
    pub user_id: i64,
    pub lesson_id: String,
    pub completed: bool,

    /// Latest quiz score, 0-100.
    pub score: i64,

    /// Completion percentage, 0-100. Mirrors the score until the lesson is
    /// completed, then pinned to 100.
    pub progress: i64,

    /// Set when the record first transitions to completed; never cleared or
    /// overwritten afterwards.
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,

    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Wire shape of a progress record. The owning user is implied by the
/// bearer credential and not exposed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressBody {
    pub id: i64,
    pub lesson_id: String,
    pub completed: bool,
    pub score: i64,
    pub progress: i64,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ProgressRecord> for ProgressBody {
    fn from(record: ProgressRecord) -> Self {
        ProgressBody {
            id: record.id,
            lesson_id: record.lesson_id,
            completed: record.completed,
            score: record.score,
            progress: record.progress,
            completed_at: record.completed_at,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// DTO for reporting lesson progress (upsert).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertProgressRequest {
    #[validate(custom(function = validate_lesson_id))]
    pub lesson_id: String,
    #[validate(range(min = 0, max = 100))]
    pub score: i64,
    pub completed: bool,
    #[validate(range(min = 0, max = 100))]
    pub progress: i64,
}

/// Validates that a lesson id belongs to the closed lesson catalog.
fn validate_lesson_id(lesson_id: &str) -> Result<(), validator::ValidationError> {
    if !catalog::is_valid_lesson_id(lesson_id) {
        return Err(validator::ValidationError::new("invalid_lesson_id"));
    }
    Ok(())
}

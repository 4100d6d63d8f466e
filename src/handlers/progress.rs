// src/handlers/progress.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use validator::Validate;

use crate::{
    catalog,
    error::AppError,
    models::progress::{ProgressBody, UpsertProgressRequest},
    state::AppState,
    store, summary,
    utils::jwt::Claims,
};

/// Update or create lesson progress (upsert).
///
/// The client reports `completed`, but the stored value is recomputed from
/// the submitted score and the configured pass policy; a tampered flag is
/// logged and overridden. Returns 201 for a first submission, 200 for a
/// re-submission.
pub async fn upsert_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<UpsertProgressRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(|e| AppError::Validation {
        message: "Invalid progress data".to_string(),
        details: serde_json::to_value(&e).ok(),
    })?;

    let user_id = claims.user_id()?;

    let completed = state.config.pass_policy.passed(payload.score as u8);
    if completed != payload.completed {
        tracing::warn!(
            user_id,
            lesson = %payload.lesson_id,
            reported = payload.completed,
            recomputed = completed,
            "client completion flag disagrees with pass policy; using recomputed value"
        );
    }
    let progress = if completed { 100 } else { payload.progress };

    let outcome = store::upsert(
        &state.pool,
        user_id,
        &payload.lesson_id,
        payload.score,
        completed,
        progress,
    )
    .await?;

    let status = if outcome.created() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    let record = outcome.into_record();

    Ok((status, Json(json!({ "progress": ProgressBody::from(record) }))))
}

/// All progress for the current user, most recently updated first.
pub async fn list_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let records = store::list(&state.pool, user_id).await?;
    let bodies: Vec<ProgressBody> = records.into_iter().map(ProgressBody::from).collect();

    Ok(Json(json!({ "progress": bodies })))
}

/// Derived statistics over the current user's progress records.
pub async fn get_summary(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let records = store::list(&state.pool, user_id).await?;
    let summary = summary::summarize(&records);

    Ok(Json(json!({ "summary": summary })))
}

/// Progress for a specific lesson.
pub async fn get_progress(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(lesson_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if !catalog::is_valid_lesson_id(&lesson_id) {
        return Err(AppError::validation("Invalid lesson ID"));
    }

    let user_id = claims.user_id()?;
    let record = store::get(&state.pool, user_id, &lesson_id).await?;

    Ok(Json(json!({ "progress": ProgressBody::from(record) })))
}

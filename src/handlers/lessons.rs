// src/handlers/lessons.rs

use axum::{
    Extension, Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;
use serde_json::json;

use crate::{
    catalog::{self, Lesson},
    error::AppError,
    grading,
    models::{
        progress::ProgressBody,
        question::{PublicQuestion, SubmitQuizRequest},
    },
    state::AppState,
    store,
    utils::jwt::Claims,
};

/// Catalog entry plus the size of its quiz.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonBody<'a> {
    #[serde(flatten)]
    lesson: &'a Lesson,
    question_count: usize,
}

/// Lists the lesson catalog.
pub async fn list_lessons() -> impl IntoResponse {
    let lessons: Vec<LessonBody<'_>> = catalog::LESSONS
        .iter()
        .map(|lesson| LessonBody {
            lesson,
            question_count: catalog::quiz_for(lesson.id)
                .map(|quiz| quiz.questions.len())
                .unwrap_or(0),
        })
        .collect();

    Json(json!({ "lessons": lessons }))
}

/// Returns a lesson's quiz with the answer keys stripped.
pub async fn get_quiz(Path(lesson_id): Path<String>) -> Result<impl IntoResponse, AppError> {
    if !catalog::is_valid_lesson_id(&lesson_id) {
        return Err(AppError::validation("Invalid lesson ID"));
    }

    let quiz = catalog::quiz_for(&lesson_id)
        .ok_or_else(|| AppError::NotFound("Lesson not found".to_string()))?;

    let questions: Vec<PublicQuestion> = quiz.questions.iter().map(PublicQuestion::from).collect();

    Ok(Json(json!({
        "quiz": {
            "lessonId": quiz.lesson_id,
            "title": quiz.title,
            "questions": questions,
        }
    })))
}

/// Grades a quiz attempt and records the result.
///
/// * Every question must be answered before the attempt is graded.
/// * The completion decision comes from the configured pass policy, not
///   from anything the client claims.
/// * The graded attempt is upserted into the progress store and the
///   canonical record is returned alongside the grade.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(lesson_id): Path<String>,
    Json(payload): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !catalog::is_valid_lesson_id(&lesson_id) {
        return Err(AppError::validation("Invalid lesson ID"));
    }

    let quiz = catalog::quiz_for(&lesson_id)
        .ok_or_else(|| AppError::NotFound("Lesson not found".to_string()))?;

    let missing: Vec<&str> = quiz
        .questions
        .iter()
        .filter(|q| !payload.answers.contains_key(&q.id))
        .map(|q| q.id.as_str())
        .collect();
    if !missing.is_empty() {
        return Err(AppError::Validation {
            message: "All questions must be answered".to_string(),
            details: Some(json!({ "unanswered": missing })),
        });
    }

    let grade = grading::grade(&quiz.questions, &payload.answers)
        .ok_or_else(|| AppError::Internal("Quiz has no questions".to_string()))?;

    let passed = state.config.pass_policy.passed(grade.score);
    let score = grade.score as i64;
    let progress = if passed { 100 } else { score };

    let user_id = claims.user_id()?;
    let outcome = store::upsert(&state.pool, user_id, &lesson_id, score, passed, progress).await?;
    let record = outcome.into_record();

    tracing::info!(
        user_id,
        lesson = %lesson_id,
        score = grade.score,
        passed,
        "quiz attempt graded"
    );

    Ok(Json(json!({
        "score": grade.score,
        "correctCount": grade.correct,
        "totalQuestions": grade.total,
        "passed": passed,
        "progress": ProgressBody::from(record),
    })))
}

// src/summary.rs
//
// Derived statistics for the dashboard and progress views. Pure functions
// over a user's progress records plus the lesson catalog.

use serde::Serialize;

use crate::catalog;
use crate::models::progress::ProgressRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// Lessons with `completed = true`.
    pub completed_lessons: usize,
    /// Rounded mean score over completed lessons; 0 when none completed.
    pub average_score: u32,
    /// Total duration of completed lessons in hours, one decimal place.
    pub total_hours: f64,
}

pub fn summarize(records: &[ProgressRecord]) -> ProgressSummary {
    let completed: Vec<&ProgressRecord> = records.iter().filter(|r| r.completed).collect();

    let average_score = if completed.is_empty() {
        0
    } else {
        let sum: i64 = completed.iter().map(|r| r.score).sum();
        (sum as f64 / completed.len() as f64).round() as u32
    };

    let minutes: u32 = completed
        .iter()
        .filter_map(|r| catalog::find_lesson(&r.lesson_id))
        .map(|lesson| lesson.duration_minutes)
        .sum();
    let total_hours = (minutes as f64 / 60.0 * 10.0).round() / 10.0;

    ProgressSummary {
        completed_lessons: completed.len(),
        average_score,
        total_hours,
    }
}

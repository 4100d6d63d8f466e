// src/grading.rs
//
// Pure quiz grading: answer evaluation, score aggregation and the pass
// threshold. Nothing here touches the database or the clock, so the whole
// module is unit-testable.

use std::str::FromStr;

use crate::models::question::{Answer, AnswerSheet, Question, QuestionKind};

/// Trimmed, case-insensitive form used for text answer comparison.
fn normalized(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Checks a submitted answer against a question's answer key.
///
/// * Text kinds (single-choice, binary-choice, fill-in-blank) match
///   case-insensitively after trimming; an empty or missing submission
///   never matches.
/// * Multi-select requires the submitted set to equal the answer set
///   exactly. A subset or superset scores as wholly incorrect.
/// * A submission of the wrong shape for the question kind is incorrect.
pub fn is_correct(question: &Question, submitted: Option<&Answer>) -> bool {
    let Some(submitted) = submitted else {
        return false;
    };

    match (&question.kind, submitted) {
        (QuestionKind::SingleChoice { answer, .. }, Answer::Text(text))
        | (QuestionKind::BinaryChoice { answer, .. }, Answer::Text(text))
        | (QuestionKind::FillInBlank { answer }, Answer::Text(text)) => {
            !text.trim().is_empty() && normalized(text) == normalized(answer)
        }
        (QuestionKind::MultiSelect { answers, .. }, Answer::Selection(selection)) => {
            selection == answers
        }
        _ => false,
    }
}

/// Result of grading one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct: usize,
    pub total: usize,
    /// `round(100 * correct / total)`, half-up.
    pub score: u8,
}

/// Grades an attempt. Unanswered questions count as incorrect.
/// Returns `None` for a quiz with no questions, which is a fixture
/// authoring error rather than a gradable attempt.
pub fn grade(questions: &[Question], answers: &AnswerSheet) -> Option<Grade> {
    if questions.is_empty() {
        return None;
    }

    let total = questions.len();
    let correct = questions
        .iter()
        .filter(|q| is_correct(q, answers.get(&q.id)))
        .count();
    let score = ((correct as f64 / total as f64) * 100.0).round() as u8;

    Some(Grade {
        correct,
        total,
        score,
    })
}

/// Minimum score required to mark a lesson completed.
///
/// Both thresholds exist in the product's history; the active one comes
/// from configuration and is applied wherever a completion decision is
/// made, so the client and the server can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PassPolicy {
    /// Lesson completes at 50% or better.
    #[default]
    AtLeastHalf,
    /// Lesson completes only on a perfect score.
    AllCorrect,
}

impl PassPolicy {
    pub fn passed(&self, score: u8) -> bool {
        match self {
            PassPolicy::AtLeastHalf => score >= 50,
            PassPolicy::AllCorrect => score == 100,
        }
    }
}

impl FromStr for PassPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "half" | "at-least-half" => Ok(PassPolicy::AtLeastHalf),
            "all" | "all-correct" | "strict" => Ok(PassPolicy::AllCorrect),
            other => Err(format!("unknown pass policy '{}'", other)),
        }
    }
}

// src/models/question.rs

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A quiz question fixture. The kind variant carries the answer key in the
/// shape that kind requires, so a question can never hold both a single
/// answer and an answer set.
#[derive(Debug, Clone)]
pub struct Question {
    /// Unique within the owning quiz.
    pub id: String,
    pub prompt: String,
    pub kind: QuestionKind,
}

/// Question type together with its options and answer key.
#[derive(Debug, Clone)]
pub enum QuestionKind {
    SingleChoice {
        options: Vec<String>,
        answer: String,
    },
    FillInBlank {
        answer: String,
    },
    BinaryChoice {
        options: [String; 2],
        answer: String,
    },
    MultiSelect {
        options: Vec<String>,
        answers: BTreeSet<String>,
    },
}

impl QuestionKind {
    /// Wire name of the question type.
    pub fn type_name(&self) -> &'static str {
        match self {
            QuestionKind::SingleChoice { .. } => "single-choice",
            QuestionKind::FillInBlank { .. } => "fill-in-blank",
            QuestionKind::BinaryChoice { .. } => "binary-choice",
            QuestionKind::MultiSelect { .. } => "multi-select",
        }
    }

    /// Selectable options, if this kind has any.
    pub fn options(&self) -> Option<Vec<String>> {
        match self {
            QuestionKind::SingleChoice { options, .. } => Some(options.clone()),
            QuestionKind::FillInBlank { .. } => None,
            QuestionKind::BinaryChoice { options, .. } => Some(options.to_vec()),
            QuestionKind::MultiSelect { options, .. } => Some(options.clone()),
        }
    }
}

/// A submitted answer: free text or radio selection for single-answer
/// kinds, a set of options for multi-select. On the wire this is
/// `string | string[]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Answer {
    Selection(BTreeSet<String>),
    Text(String),
}

/// Client-held submission state: question id -> answer. Unanswered
/// questions are simply absent.
pub type AnswerSheet = HashMap<String, Answer>;

/// DTO for submitting a quiz attempt.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub answers: AnswerSheet,
}

/// DTO for sending a question to the client (excludes the answer key).
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: &'static str,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl From<&Question> for PublicQuestion {
    fn from(question: &Question) -> Self {
        PublicQuestion {
            id: question.id.clone(),
            question_type: question.kind.type_name(),
            prompt: question.prompt.clone(),
            options: question.kind.options(),
        }
    }
}

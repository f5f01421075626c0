//! Stored answers and submitted answer sheets

use super::question::{ChoiceLabel, QuestionId};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub type UserId = String;

/// Question id to choice id (or choice text), in submission order
pub type AnswerSheet = IndexMap<String, String>;

/// A user's answer to one categorized question; unique per (user, question)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub user: UserId,
    pub question_id: QuestionId,
    pub choice: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Answer {
    pub fn new(user: impl Into<UserId>, question_id: QuestionId, choice: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            question_id,
            choice: choice.into(),
            created_at: Utc::now(),
        }
    }

    /// The ordinal label, if the stored choice is one we recognize
    pub fn label(&self) -> Option<ChoiceLabel> {
        self.choice.parse().ok()
    }
}

/// One entry of a batch answer submission; either field may be missing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    #[serde(default)]
    pub question: Option<QuestionId>,
    #[serde(default)]
    pub choice: Option<String>,
}

impl AnswerSubmission {
    pub fn new(question: QuestionId, choice: impl Into<String>) -> Self {
        Self {
            question: Some(question),
            choice: Some(choice.into()),
        }
    }
}

/// Result of a batch submission
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionReport {
    pub saved: Vec<Answer>,
    pub errors: Vec<String>,
    pub total_submitted: usize,
}

//! Report structures handed to the formatters

use crate::model::{Career, SubmissionReport};
use crate::scoring::{AttemptComparison, AttemptSummary, CareerMatch, CategoryTally, QuizOutcome, QuizStats};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A rendered command result with its metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub body: ReportBody,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Quiz bank the report was computed from
    pub bank_file: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum ReportBody {
    Analysis(Vec<CareerMatch>),
    Quiz(QuizReport),
    Summary(AttemptSummary),
    Comparison(AttemptComparison),
    Tally(CategoryTally),
    Dislikes(Vec<Career>),
    Stats(QuizStats),
    Submission(SubmissionReport),
}

/// Additive scoring result, with the attempt id when it was recorded
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    pub outcome: QuizOutcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_id: Option<u64>,
}

impl Report {
    pub fn new(title: impl Into<String>, user: Option<&str>, bank_file: impl Into<String>, body: ReportBody) -> Self {
        Self {
            metadata: ReportMetadata {
                title: title.into(),
                user: user.map(str::to_string),
                bank_file: bank_file.into(),
                generated_at: Utc::now(),
            },
            body,
        }
    }
}

/// Verdict for a 0..=100 match score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStrength {
    Excellent,
    Strong,
    Moderate,
    Weak,
}

impl MatchStrength {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            MatchStrength::Excellent
        } else if score >= 60.0 {
            MatchStrength::Strong
        } else if score >= 40.0 {
            MatchStrength::Moderate
        } else {
            MatchStrength::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MatchStrength::Excellent => "EXCELLENT",
            MatchStrength::Strong => "STRONG",
            MatchStrength::Moderate => "MODERATE",
            MatchStrength::Weak => "WEAK",
        }
    }
}

//! Derived recommendation records

use super::answer::UserId;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Persisted result of a keyword analysis run; unique per (user, career)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecommendation {
    pub user: UserId,
    pub career: String,
    /// Match score in [0, 100]
    pub match_score: f64,
    pub reasoning: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

/// A career picked by the additive scorer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCareer {
    pub slug: String,
    pub name: String,
    pub score: i64,
}

/// One scored run of the field-based quiz
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizAttempt {
    pub id: u64,
    #[serde(default)]
    pub user: Option<UserId>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_level: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream: Option<String>,
    /// Raw per-career totals of the attempt
    #[serde(default)]
    pub results: IndexMap<String, i64>,
    #[serde(default)]
    pub recommendations: Vec<RankedCareer>,
}

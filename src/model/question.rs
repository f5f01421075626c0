//! Quiz questions, their choices and the ordinal answer scale

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type QuestionId = u64;
pub type ChoiceId = u64;

/// Category of a categorized question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Interest,
    Degree,
    Career,
}

impl QuestionCategory {
    pub const ALL: [QuestionCategory; 3] = [
        QuestionCategory::Interest,
        QuestionCategory::Degree,
        QuestionCategory::Career,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionCategory::Interest => "interest",
            QuestionCategory::Degree => "degree",
            QuestionCategory::Career => "career",
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "interest" => Ok(QuestionCategory::Interest),
            "degree" => Ok(QuestionCategory::Degree),
            "career" => Ok(QuestionCategory::Career),
            other => Err(format!("Unknown question category: {}", other)),
        }
    }
}

/// Ordinal preference label a user picks for a categorized question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceLabel {
    StronglyDislike,
    Dislike,
    Neutral,
    Like,
    StronglyLike,
    LoveIt,
    HateIt,
}

impl ChoiceLabel {
    pub const ALL: [ChoiceLabel; 7] = [
        ChoiceLabel::StronglyDislike,
        ChoiceLabel::Dislike,
        ChoiceLabel::Neutral,
        ChoiceLabel::Like,
        ChoiceLabel::StronglyLike,
        ChoiceLabel::LoveIt,
        ChoiceLabel::HateIt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChoiceLabel::StronglyDislike => "strongly_dislike",
            ChoiceLabel::Dislike => "dislike",
            ChoiceLabel::Neutral => "neutral",
            ChoiceLabel::Like => "like",
            ChoiceLabel::StronglyLike => "strongly_like",
            ChoiceLabel::LoveIt => "love_it",
            ChoiceLabel::HateIt => "hate_it",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ChoiceLabel::StronglyDislike => "Strongly Dislike",
            ChoiceLabel::Dislike => "Dislike",
            ChoiceLabel::Neutral => "Neutral",
            ChoiceLabel::Like => "Like",
            ChoiceLabel::StronglyLike => "Strongly Like",
            ChoiceLabel::LoveIt => "Love It",
            ChoiceLabel::HateIt => "Hate It",
        }
    }

    /// True for the labels that express a negative preference
    pub fn is_negative(&self) -> bool {
        matches!(
            self,
            ChoiceLabel::StronglyDislike | ChoiceLabel::Dislike | ChoiceLabel::HateIt
        )
    }
}

impl fmt::Display for ChoiceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChoiceLabel {
    type Err = String;

    /// Accepts both the stored form (`strongly_like`) and the display form (`Strongly Like`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(&[' ', '-'][..], "_");
        ChoiceLabel::ALL
            .iter()
            .find(|label| label.as_str() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown choice label: {}", s))
    }
}

/// One selectable option of a field-based question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ChoiceId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Career slug to points awarded when this choice is picked
    #[serde(default)]
    pub scores: IndexMap<String, i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionKind {
    /// Answered on the ordinal scale, matched against career keywords
    Categorized { category: QuestionCategory },
    /// Answered by picking a choice that carries career points directly
    FieldBased {
        field: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        academic_level: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stream: Option<String>,
        #[serde(default)]
        choices: Vec<Choice>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

impl Question {
    pub fn categorized(id: QuestionId, text: impl Into<String>, category: QuestionCategory) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::Categorized { category },
        }
    }

    pub fn field_based(
        id: QuestionId,
        text: impl Into<String>,
        field: impl Into<String>,
        choices: Vec<Choice>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            kind: QuestionKind::FieldBased {
                field: field.into(),
                academic_level: None,
                stream: None,
                choices,
            },
        }
    }

    pub fn category(&self) -> Option<QuestionCategory> {
        match &self.kind {
            QuestionKind::Categorized { category } => Some(*category),
            QuestionKind::FieldBased { .. } => None,
        }
    }

    pub fn choices(&self) -> &[Choice] {
        match &self.kind {
            QuestionKind::FieldBased { choices, .. } => choices,
            QuestionKind::Categorized { .. } => &[],
        }
    }

    pub fn is_field_based(&self) -> bool {
        matches!(self.kind, QuestionKind::FieldBased { .. })
    }

    pub fn choice(&self, id: ChoiceId) -> Option<&Choice> {
        self.choices().iter().find(|c| c.id == id)
    }

    /// Look a choice up by its visible text, ignoring case
    pub fn choice_by_text(&self, text: &str) -> Option<&Choice> {
        let wanted = text.trim().to_lowercase();
        self.choices().iter().find(|c| c.text.to_lowercase() == wanted)
    }
}

impl Choice {
    pub fn new(id: ChoiceId, text: impl Into<String>, scores: &[(&str, i64)]) -> Self {
        Self {
            id,
            text: text.into(),
            reason: None,
            scores: scores.iter().map(|(slug, points)| (slug.to_string(), *points)).collect(),
        }
    }
}

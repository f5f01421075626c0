//! Ordinal choice scorer: choice label to signed weight, per question category

use crate::model::{ChoiceLabel, QuestionCategory};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label name to weight for one category
pub type LabelWeights = IndexMap<String, f64>;

/// Category-aware weight tables.
///
/// Interest and career questions use the full -2..2 scale; degree questions use
/// half the magnitude. Lookups that miss a category or a label yield 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceWeightTable {
    pub interest: LabelWeights,
    pub degree: LabelWeights,
    pub career: LabelWeights,
}

impl Default for ChoiceWeightTable {
    fn default() -> Self {
        Self {
            interest: Self::scale(1.0),
            degree: Self::scale(0.5),
            career: Self::scale(1.0),
        }
    }
}

impl ChoiceWeightTable {
    fn scale(factor: f64) -> LabelWeights {
        ChoiceLabel::ALL
            .iter()
            .map(|label| (label.as_str().to_string(), Self::base_weight(*label) * factor))
            .collect()
    }

    fn base_weight(label: ChoiceLabel) -> f64 {
        match label {
            ChoiceLabel::StronglyDislike | ChoiceLabel::HateIt => -2.0,
            ChoiceLabel::Dislike => -1.0,
            ChoiceLabel::Neutral => 0.0,
            ChoiceLabel::Like => 1.0,
            ChoiceLabel::StronglyLike | ChoiceLabel::LoveIt => 2.0,
        }
    }

    pub fn for_category(&self, category: QuestionCategory) -> &LabelWeights {
        match category {
            QuestionCategory::Interest => &self.interest,
            QuestionCategory::Degree => &self.degree,
            QuestionCategory::Career => &self.career,
        }
    }

    /// Weight of `choice` for a question of `category`.
    ///
    /// `choice` is matched in its stored form; display forms such as
    /// "Strongly Like" are normalized first.
    pub fn weight(&self, category: Option<QuestionCategory>, choice: &str) -> f64 {
        let Some(category) = category else {
            return 0.0;
        };
        let table = self.for_category(category);
        if let Some(weight) = table.get(choice) {
            return *weight;
        }
        choice
            .parse::<ChoiceLabel>()
            .ok()
            .and_then(|label| table.get(label.as_str()).copied())
            .unwrap_or(0.0)
    }

    /// Full-scale weight regardless of category, as used by the keyword analyzer
    pub fn full_scale_weight(&self, choice: &str) -> f64 {
        self.weight(Some(QuestionCategory::Interest), choice)
    }

    pub(crate) fn all_weights(&self) -> impl Iterator<Item = f64> + '_ {
        self.interest
            .values()
            .chain(self.degree.values())
            .chain(self.career.values())
            .copied()
    }
}

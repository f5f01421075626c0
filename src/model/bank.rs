//! The quiz bank: everything a scoring run reads and writes

use super::answer::Answer;
use super::career::{validate_slug, Career};
use super::question::Question;
use super::recommendation::{CareerRecommendation, QuizAttempt};
use crate::error::{CareerAdvisorError, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuizBank {
    #[serde(default)]
    pub careers: Vec<Career>,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub attempts: Vec<QuizAttempt>,
    #[serde(default)]
    pub recommendations: Vec<CareerRecommendation>,
}

impl QuizBank {
    /// Check referential integrity and collapse duplicate answers.
    ///
    /// A later answer for the same (user, question) replaces the earlier one.
    pub fn validate(&mut self) -> Result<()> {
        let mut slugs = HashSet::new();
        for career in &self.careers {
            validate_slug(&career.slug)?;
            if !slugs.insert(career.slug.as_str()) {
                return Err(CareerAdvisorError::Dataset(format!(
                    "Duplicate career slug: {}",
                    career.slug
                )));
            }
        }

        let mut question_ids = HashSet::new();
        for question in &self.questions {
            if !question_ids.insert(question.id) {
                return Err(CareerAdvisorError::Dataset(format!(
                    "Duplicate question id: {}",
                    question.id
                )));
            }
            let mut choice_ids = HashSet::new();
            for choice in question.choices() {
                if !choice_ids.insert(choice.id) {
                    return Err(CareerAdvisorError::Dataset(format!(
                        "Duplicate choice id {} in question {}",
                        choice.id, question.id
                    )));
                }
            }
        }

        if let Some(orphan) = self.answers.iter().find(|a| !question_ids.contains(&a.question_id)) {
            return Err(CareerAdvisorError::Dataset(format!(
                "Answer by '{}' references unknown question {}",
                orphan.user, orphan.question_id
            )));
        }

        let mut latest: HashMap<(String, u64), usize> = HashMap::new();
        let mut deduped: Vec<Answer> = Vec::with_capacity(self.answers.len());
        for answer in self.answers.drain(..) {
            let key = (answer.user.clone(), answer.question_id);
            match latest.get(&key) {
                Some(&index) => {
                    warn!(
                        "Duplicate answer by '{}' for question {}; keeping the later one",
                        answer.user, answer.question_id
                    );
                    deduped[index] = answer;
                }
                None => {
                    latest.insert(key, deduped.len());
                    deduped.push(answer);
                }
            }
        }
        self.answers = deduped;

        Ok(())
    }
}

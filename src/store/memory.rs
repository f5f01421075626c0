//! In-memory store backed by a quiz bank

use super::{AttemptStore, NewAttempt, QuizRepository, RecommendationSink};
use crate::error::{CareerAdvisorError, Result};
use crate::model::{
    Answer, AnswerSubmission, Career, CareerRecommendation, ChoiceLabel, Question, QuestionId,
    QuizAttempt, QuizBank, SubmissionReport,
};
use chrono::Utc;
use log::{debug, info};
use std::collections::HashSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

pub struct InMemoryStore {
    bank: RwLock<QuizBank>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            bank: RwLock::new(QuizBank::default()),
        }
    }

    /// Validate `bank` and take ownership of it
    pub fn from_bank(mut bank: QuizBank) -> Result<Self> {
        bank.validate()?;
        Ok(Self {
            bank: RwLock::new(bank),
        })
    }

    /// Copy of the current state, e.g. for writing back to disk
    pub fn snapshot(&self) -> Result<QuizBank> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, QuizBank>> {
        self.bank
            .read()
            .map_err(|_| CareerAdvisorError::Persistence("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, QuizBank>> {
        self.bank
            .write()
            .map_err(|_| CareerAdvisorError::Persistence("store lock poisoned".to_string()))
    }

    pub fn add_career(&self, career: Career) -> Result<()> {
        crate::model::career::validate_slug(&career.slug)?;
        let mut bank = self.write()?;
        if bank.careers.iter().any(|c| c.slug == career.slug) {
            return Err(CareerAdvisorError::Dataset(format!("Duplicate career slug: {}", career.slug)));
        }
        bank.careers.push(career);
        Ok(())
    }

    pub fn add_question(&self, question: Question) -> Result<()> {
        let mut bank = self.write()?;
        if bank.questions.iter().any(|q| q.id == question.id) {
            return Err(CareerAdvisorError::Dataset(format!("Duplicate question id: {}", question.id)));
        }
        bank.questions.push(question);
        Ok(())
    }

    /// Store `choice` as the user's answer to `question`, replacing any earlier answer
    pub fn upsert_answer(&self, user: &str, question: QuestionId, choice: &str) -> Result<Answer> {
        let mut bank = self.write()?;
        if !bank.questions.iter().any(|q| q.id == question) {
            return Err(CareerAdvisorError::QuestionNotFound(question));
        }

        let answer = Answer::new(user, question, choice);
        match bank
            .answers
            .iter_mut()
            .find(|a| a.user == user && a.question_id == question)
        {
            Some(existing) => {
                debug!("Overwriting answer by '{}' for question {}", user, question);
                *existing = answer.clone();
            }
            None => bank.answers.push(answer.clone()),
        }
        Ok(answer)
    }

    /// Batch submission; bad entries are reported and skipped, the rest are saved
    pub fn submit_answers(&self, user: &str, entries: &[AnswerSubmission]) -> Result<SubmissionReport> {
        let mut report = SubmissionReport::default();

        for entry in entries {
            let (Some(question), Some(choice)) = (entry.question, entry.choice.as_deref()) else {
                report.errors.push(format!("Missing question or choice for answer: {:?}", entry));
                continue;
            };

            if choice.parse::<ChoiceLabel>().is_err() {
                report
                    .errors
                    .push(format!("Error processing answer for question {}: unknown choice '{}'", question, choice));
                continue;
            }

            match self.upsert_answer(user, question, choice) {
                Ok(answer) => report.saved.push(answer),
                Err(CareerAdvisorError::QuestionNotFound(id)) => {
                    report
                        .errors
                        .push(format!("Error processing answer for question {}: question not found", id));
                }
                Err(e) => return Err(e),
            }
        }

        report.total_submitted = report.saved.len();
        info!(
            "Saved {} answers for '{}' ({} rejected)",
            report.total_submitted,
            user,
            report.errors.len()
        );
        Ok(report)
    }

    /// Forget every answer of `user`
    pub fn reset_answers(&self, user: &str) -> Result<usize> {
        let mut bank = self.write()?;
        let before = bank.answers.len();
        bank.answers.retain(|a| a.user != user);
        Ok(before - bank.answers.len())
    }

    pub fn recommendations_for(&self, user: &str) -> Result<Vec<CareerRecommendation>> {
        Ok(self
            .read()?
            .recommendations
            .iter()
            .filter(|r| r.user == user)
            .cloned()
            .collect())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl QuizRepository for InMemoryStore {
    fn answers_for_user(&self, user: &str) -> Result<Vec<Answer>> {
        Ok(self
            .read()?
            .answers
            .iter()
            .filter(|a| a.user == user)
            .cloned()
            .collect())
    }

    fn careers(&self) -> Result<Vec<Career>> {
        Ok(self.read()?.careers.clone())
    }

    fn questions(&self) -> Result<Vec<Question>> {
        Ok(self.read()?.questions.clone())
    }

    fn question(&self, id: QuestionId) -> Result<Option<Question>> {
        Ok(self.read()?.questions.iter().find(|q| q.id == id).cloned())
    }
}

impl RecommendationSink for InMemoryStore {
    fn replace_recommendations(&self, user: &str, recommendations: Vec<CareerRecommendation>) -> Result<()> {
        let mut bank = self.write()?;
        validate_replacement(&bank, user, &recommendations)?;

        bank.recommendations.retain(|r| r.user != user);
        bank.recommendations.extend(recommendations);
        Ok(())
    }
}

/// The whole batch is checked before anything is touched
fn validate_replacement(bank: &QuizBank, user: &str, recommendations: &[CareerRecommendation]) -> Result<()> {
    let mut seen = HashSet::new();
    for rec in recommendations {
        if rec.user != user {
            return Err(CareerAdvisorError::Persistence(format!(
                "recommendation for '{}' submitted under '{}'",
                rec.user, user
            )));
        }
        if !seen.insert(rec.career.as_str()) {
            return Err(CareerAdvisorError::Persistence(format!(
                "duplicate recommendation for career '{}'",
                rec.career
            )));
        }
        if !rec.match_score.is_finite() || !(0.0..=100.0).contains(&rec.match_score) {
            return Err(CareerAdvisorError::Persistence(format!(
                "match score {} for '{}' is outside 0..=100",
                rec.match_score, rec.career
            )));
        }
        if !bank.careers.iter().any(|c| c.slug == rec.career) {
            return Err(CareerAdvisorError::Persistence(format!("unknown career '{}'", rec.career)));
        }
    }
    Ok(())
}

impl AttemptStore for InMemoryStore {
    fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt> {
        let mut bank = self.write()?;
        let id = bank.attempts.iter().map(|a| a.id).max().unwrap_or(0) + 1;

        let attempt = QuizAttempt {
            id,
            user: attempt.user,
            timestamp: Utc::now(),
            academic_level: attempt.academic_level,
            stream: attempt.stream,
            results: attempt.results,
            recommendations: attempt.recommendations,
        };
        bank.attempts.push(attempt.clone());
        Ok(attempt)
    }

    fn attempts_for_user(&self, user: &str) -> Result<Vec<QuizAttempt>> {
        Ok(self
            .read()?
            .attempts
            .iter()
            .filter(|a| a.user.as_deref() == Some(user))
            .cloned()
            .collect())
    }

    fn attempt(&self, id: u64) -> Result<Option<QuizAttempt>> {
        Ok(self.read()?.attempts.iter().find(|a| a.id == id).cloned())
    }
}

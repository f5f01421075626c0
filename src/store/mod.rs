//! Data access seams used by the scorers

pub mod memory;

use crate::error::Result;
use crate::model::{
    Answer, Career, CareerRecommendation, Choice, ChoiceId, Question, QuestionId, QuizAttempt,
    RankedCareer,
};
use indexmap::IndexMap;

pub use memory::InMemoryStore;

/// Read side of the quiz data
pub trait QuizRepository {
    fn answers_for_user(&self, user: &str) -> Result<Vec<Answer>>;
    fn careers(&self) -> Result<Vec<Career>>;
    fn questions(&self) -> Result<Vec<Question>>;
    fn question(&self, id: QuestionId) -> Result<Option<Question>>;

    fn choice(&self, question: QuestionId, choice: ChoiceId) -> Result<Option<Choice>> {
        Ok(self
            .question(question)?
            .and_then(|q| q.choice(choice).cloned()))
    }
}

/// Persistence of analysis results.
///
/// A replace either swaps the user's whole set or leaves it untouched.
pub trait RecommendationSink {
    fn replace_recommendations(&self, user: &str, recommendations: Vec<CareerRecommendation>) -> Result<()>;
}

/// Everything needed to record a scored quiz run
#[derive(Debug, Clone, Default)]
pub struct NewAttempt {
    pub user: Option<String>,
    pub academic_level: Option<String>,
    pub stream: Option<String>,
    pub results: IndexMap<String, i64>,
    pub recommendations: Vec<RankedCareer>,
}

pub trait AttemptStore {
    fn record_attempt(&self, attempt: NewAttempt) -> Result<QuizAttempt>;
    fn attempts_for_user(&self, user: &str) -> Result<Vec<QuizAttempt>>;
    fn attempt(&self, id: u64) -> Result<Option<QuizAttempt>>;
}

//! Quiz, career and recommendation data model

pub mod answer;
pub mod bank;
pub mod career;
pub mod question;
pub mod recommendation;

pub use answer::{Answer, AnswerSheet, AnswerSubmission, SubmissionReport, UserId};
pub use bank::QuizBank;
pub use career::{Career, CareerMetadata, GrowthProspect};
pub use question::{Choice, ChoiceId, ChoiceLabel, Question, QuestionCategory, QuestionId, QuestionKind};
pub use recommendation::{CareerRecommendation, QuizAttempt, RankedCareer};

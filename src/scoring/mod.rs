//! Career scoring: the keyword analyzer, the additive quiz scorer and the views built on them

pub mod additive;
pub mod analyzer;
pub mod choice_weights;
pub mod insights;
pub mod keyword_matcher;
pub mod ranking;
pub mod summary;

pub use additive::{score_answers, submit_quiz, AnswerOutcome, AttemptContext, QuizOutcome, SkipReason};
pub use analyzer::{CareerAnalyzer, CareerMatch, ScoreBreakdown};
pub use choice_weights::ChoiceWeightTable;
pub use insights::{disliked_careers, quiz_stats, tally_categories, CategoryScore, CategoryTally, QuizStats};
pub use summary::{compare_attempts, summarize_attempts, AttemptComparison, AttemptSummary, SummaryEntry};

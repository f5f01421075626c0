//! Simple additive scorer for field-based quizzes

use crate::error::Result;
use crate::model::{AnswerSheet, ChoiceId, QuestionId, QuizAttempt, RankedCareer};
use crate::scoring::ranking::rank_careers;
use crate::store::{AttemptStore, NewAttempt, QuizRepository};
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why an answer did not contribute to the totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    MalformedQuestionId { raw: String },
    UnknownQuestion { question: QuestionId },
    NotFieldBased { question: QuestionId },
    UnknownChoice { question: QuestionId, choice: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MalformedQuestionId { raw } => write!(f, "'{}' is not a question id", raw),
            SkipReason::UnknownQuestion { question } => write!(f, "question {} does not exist", question),
            SkipReason::NotFieldBased { question } => {
                write!(f, "question {} has no scored choices", question)
            }
            SkipReason::UnknownChoice { question, choice } => {
                write!(f, "question {} has no choice '{}'", question, choice)
            }
        }
    }
}

/// What happened to one entry of the answer sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnswerOutcome {
    Matched { question: QuestionId, choice: ChoiceId },
    Skipped { question: String, choice: String, reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizOutcome {
    /// Per-career totals in first-seen order
    pub raw_scores: IndexMap<String, i64>,
    pub top: Vec<RankedCareer>,
    pub outcomes: Vec<AnswerOutcome>,
}

impl QuizOutcome {
    pub fn skipped(&self) -> impl Iterator<Item = &AnswerOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, AnswerOutcome::Skipped { .. }))
    }
}

/// Add each career's points from `contribution` into `totals`.
///
/// Totals saturate at the `i64` bounds.
pub fn accumulate(totals: &mut IndexMap<String, i64>, contribution: &IndexMap<String, i64>) {
    for (slug, points) in contribution {
        let total = totals.entry(slug.clone()).or_insert(0);
        *total = total.saturating_add(*points);
    }
}

/// Sum the career points of every picked choice and rank the totals.
///
/// `answers` maps question ids to a choice id or the choice's text. Entries
/// that cannot be resolved are skipped and reported in `outcomes`.
pub fn score_answers<R: QuizRepository>(repository: &R, answers: &AnswerSheet, top: usize) -> Result<QuizOutcome> {
    let mut raw_scores = IndexMap::new();
    let mut outcomes = Vec::with_capacity(answers.len());

    for (raw_question, raw_choice) in answers {
        match resolve(repository, raw_question, raw_choice)? {
            Ok((question, choice, scores)) => {
                accumulate(&mut raw_scores, &scores);
                outcomes.push(AnswerOutcome::Matched { question, choice });
            }
            Err(reason) => {
                warn!("Skipping answer {} -> {}: {}", raw_question, raw_choice, reason);
                outcomes.push(AnswerOutcome::Skipped {
                    question: raw_question.clone(),
                    choice: raw_choice.clone(),
                    reason,
                });
            }
        }
    }

    let top = rank_careers(&raw_scores, top);
    Ok(QuizOutcome {
        raw_scores,
        top,
        outcomes,
    })
}

type Resolved = (QuestionId, ChoiceId, IndexMap<String, i64>);

/// Outer error is a repository failure; inner error is a skip
fn resolve<R: QuizRepository>(
    repository: &R,
    raw_question: &str,
    raw_choice: &str,
) -> Result<std::result::Result<Resolved, SkipReason>> {
    let Ok(question_id) = raw_question.trim().parse::<QuestionId>() else {
        return Ok(Err(SkipReason::MalformedQuestionId {
            raw: raw_question.to_string(),
        }));
    };
    let Some(question) = repository.question(question_id)? else {
        return Ok(Err(SkipReason::UnknownQuestion { question: question_id }));
    };
    if !question.is_field_based() {
        return Ok(Err(SkipReason::NotFieldBased { question: question_id }));
    }

    let choice = match raw_choice.trim().parse::<ChoiceId>() {
        Ok(choice_id) => repository.choice(question_id, choice_id)?,
        Err(_) => question.choice_by_text(raw_choice).cloned(),
    };

    Ok(match choice {
        Some(choice) => Ok((question_id, choice.id, choice.scores)),
        None => Err(SkipReason::UnknownChoice {
            question: question_id,
            choice: raw_choice.to_string(),
        }),
    })
}

/// Context recorded alongside a scored attempt
#[derive(Debug, Clone, Default)]
pub struct AttemptContext {
    pub user: Option<String>,
    pub academic_level: Option<String>,
    pub stream: Option<String>,
}

/// Score a submission and record it as a quiz attempt
pub fn submit_quiz<S>(store: &S, context: AttemptContext, answers: &AnswerSheet, top: usize) -> Result<(QuizOutcome, QuizAttempt)>
where
    S: QuizRepository + AttemptStore,
{
    let outcome = score_answers(store, answers, top)?;
    let attempt = store.record_attempt(NewAttempt {
        user: context.user,
        academic_level: context.academic_level,
        stream: context.stream,
        results: outcome.raw_scores.clone(),
        recommendations: outcome.top.clone(),
    })?;
    info!(
        "Recorded quiz attempt {} with {} scored careers",
        attempt.id,
        attempt.results.len()
    );
    Ok((outcome, attempt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, Question, QuestionCategory};
    use crate::store::InMemoryStore;

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .add_question(Question::field_based(
                1,
                "Which academic subject do you enjoy most?",
                "Engineering",
                vec![
                    Choice::new(1, "Computer Science", &[("cse", 5), ("it", 4), ("ece", 2)]),
                    Choice::new(2, "Physics", &[("cse", 2), ("ece", 3), ("me", 5), ("ce", 4)]),
                ],
            ))
            .unwrap();
        store
            .add_question(Question::field_based(
                2,
                "Which activity sounds the most fun?",
                "Engineering",
                vec![
                    Choice::new(3, "Coding games", &[("cse", 5), ("it", 5)]),
                    Choice::new(4, "Fixing machines", &[("me", -2), ("ece", 3)]),
                ],
            ))
            .unwrap();
        store
            .add_question(Question::categorized(3, "Do you like gardening?", QuestionCategory::Interest))
            .unwrap();
        store
    }

    fn sheet(entries: &[(&str, &str)]) -> AnswerSheet {
        entries.iter().map(|(q, c)| (q.to_string(), c.to_string())).collect()
    }

    #[test]
    fn test_points_accumulate_across_answers() {
        let store = store();
        let outcome = score_answers(&store, &sheet(&[("1", "1"), ("2", "3")]), 3).unwrap();

        assert_eq!(outcome.raw_scores["cse"], 10);
        assert_eq!(outcome.raw_scores["it"], 9);
        assert_eq!(outcome.raw_scores["ece"], 2);
        let top: Vec<(&str, i64)> = outcome.top.iter().map(|r| (r.slug.as_str(), r.score)).collect();
        assert_eq!(top, vec![("cse", 10), ("it", 9), ("ece", 2)]);
        assert_eq!(outcome.top[0].name, "Cse");
    }

    #[test]
    fn test_choice_by_text() {
        let store = store();
        let outcome = score_answers(&store, &sheet(&[("1", "physics")]), 3).unwrap();
        assert_eq!(outcome.top[0].slug, "me");
        assert_eq!(outcome.skipped().count(), 0);
    }

    #[test]
    fn test_bad_references_are_skipped_with_reasons() {
        let store = store();
        let outcome = score_answers(
            &store,
            &sheet(&[("abc", "1"), ("9", "1"), ("3", "1"), ("1", "7"), ("2", "4")]),
            3,
        )
        .unwrap();

        let reasons: Vec<SkipReason> = outcome
            .outcomes
            .iter()
            .filter_map(|o| match o {
                AnswerOutcome::Skipped { reason, .. } => Some(reason.clone()),
                AnswerOutcome::Matched { .. } => None,
            })
            .collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::MalformedQuestionId { raw: "abc".to_string() },
                SkipReason::UnknownQuestion { question: 9 },
                SkipReason::NotFieldBased { question: 3 },
                SkipReason::UnknownChoice { question: 1, choice: "7".to_string() },
            ]
        );
        assert_eq!(outcome.outcomes.last(), Some(&AnswerOutcome::Matched { question: 2, choice: 4 }));
    }

    #[test]
    fn test_negative_totals_still_ranked() {
        let store = store();
        let outcome = score_answers(&store, &sheet(&[("2", "4")]), 3).unwrap();
        let slugs: Vec<&str> = outcome.top.iter().map(|r| r.slug.as_str()).collect();
        assert_eq!(slugs, vec!["ece", "me"]);
        assert_eq!(outcome.top[1].score, -2);
    }

    #[test]
    fn test_totals_saturate_at_bounds() {
        let store = InMemoryStore::new();
        store
            .add_question(Question::field_based(1, "First", "Engineering", vec![Choice::new(1, "Max", &[("cse", i64::MAX)])]))
            .unwrap();
        store
            .add_question(Question::field_based(2, "Second", "Engineering", vec![Choice::new(2, "One", &[("cse", 1)])]))
            .unwrap();

        let outcome = score_answers(&store, &sheet(&[("1", "1"), ("2", "2")]), 3).unwrap();
        assert_eq!(outcome.raw_scores["cse"], i64::MAX);

        let mut totals = IndexMap::from([("me".to_string(), i64::MIN)]);
        accumulate(&mut totals, &IndexMap::from([("me".to_string(), -5)]));
        assert_eq!(totals["me"], i64::MIN);
    }

    #[test]
    fn test_empty_sheet() {
        let store = store();
        let outcome = score_answers(&store, &AnswerSheet::new(), 3).unwrap();
        assert!(outcome.raw_scores.is_empty());
        assert!(outcome.top.is_empty());
    }

    #[test]
    fn test_submit_quiz_records_attempt() {
        let store = store();
        let context = AttemptContext {
            user: Some("alice".to_string()),
            academic_level: Some("12th".to_string()),
            stream: Some("Engineering".to_string()),
        };
        let (outcome, attempt) = submit_quiz(&store, context, &sheet(&[("1", "1")]), 2).unwrap();

        assert_eq!(attempt.results, outcome.raw_scores);
        assert_eq!(attempt.recommendations.len(), 2);
        assert_eq!(store.attempts_for_user("alice").unwrap().len(), 1);
    }
}

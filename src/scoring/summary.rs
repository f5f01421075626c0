//! Aggregation over a user's quiz history

use crate::error::{CareerAdvisorError, Result};
use crate::model::{Career, QuizAttempt};
use crate::scoring::additive::accumulate;
use crate::scoring::ranking::rank_careers;
use crate::store::{AttemptStore, QuizRepository};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use log::{info, warn};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub slug: String,
    pub name: String,
    pub total_score: i64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub user: String,
    pub attempts: usize,
    pub top_careers: Vec<SummaryEntry>,
}

/// Sum every attempt's totals and rank the result.
///
/// Attempts are visited newest first, so ties go to the career seen in the
/// most recent attempt. Slugs missing from the catalogue are dropped after
/// the cut, which can leave fewer than `top` entries.
pub fn summarize_attempts<S>(store: &S, user: &str, top: usize) -> Result<AttemptSummary>
where
    S: QuizRepository + AttemptStore,
{
    let mut attempts = store.attempts_for_user(user)?;
    attempts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));

    let mut totals = IndexMap::new();
    for attempt in &attempts {
        accumulate(&mut totals, &attempt.results);
    }

    let catalogue = store.careers()?;
    let top_careers = rank_careers(&totals, top)
        .into_iter()
        .filter_map(|ranked| match find_career(&catalogue, &ranked.slug) {
            Some(career) => Some(SummaryEntry {
                slug: ranked.slug,
                name: career.name.clone(),
                total_score: ranked.score,
                description: career.description.clone(),
            }),
            None => {
                warn!("Career '{}' from the quiz history is not in the catalogue", ranked.slug);
                None
            }
        })
        .collect();

    info!("Summarized {} attempts for '{}'", attempts.len(), user);
    Ok(AttemptSummary {
        user: user.to_string(),
        attempts: attempts.len(),
        top_careers,
    })
}

fn find_career<'a>(catalogue: &'a [Career], slug: &str) -> Option<&'a Career> {
    catalogue.iter().find(|c| c.slug == slug)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparedCareer {
    pub slug: String,
    pub name: String,
    pub score: i64,
    /// None when the slug is not in the catalogue
    pub career: Option<Career>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptView {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub recommendations: Vec<ComparedCareer>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptComparison {
    pub user: String,
    pub first: AttemptView,
    pub second: AttemptView,
}

/// Side-by-side view of two of the user's attempts
pub fn compare_attempts<S>(store: &S, user: &str, first: u64, second: u64) -> Result<AttemptComparison>
where
    S: QuizRepository + AttemptStore,
{
    let catalogue = store.careers()?;
    let first = owned_attempt(store, user, first)?;
    let second = owned_attempt(store, user, second)?;

    Ok(AttemptComparison {
        user: user.to_string(),
        first: view(&catalogue, first),
        second: view(&catalogue, second),
    })
}

fn owned_attempt<S: AttemptStore>(store: &S, user: &str, id: u64) -> Result<QuizAttempt> {
    match store.attempt(id)? {
        Some(attempt) if attempt.user.as_deref() == Some(user) => Ok(attempt),
        _ => Err(CareerAdvisorError::AttemptNotFound(id)),
    }
}

fn view(catalogue: &[Career], attempt: QuizAttempt) -> AttemptView {
    let recommendations = attempt
        .recommendations
        .into_iter()
        .map(|ranked| {
            let career = find_career(catalogue, &ranked.slug).cloned();
            ComparedCareer {
                name: career.as_ref().map(|c| c.name.clone()).unwrap_or(ranked.name),
                slug: ranked.slug,
                score: ranked.score,
                career,
            }
        })
        .collect();

    AttemptView {
        id: attempt.id,
        timestamp: attempt.timestamp,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{QuizBank, RankedCareer};
    use crate::store::{InMemoryStore, NewAttempt};

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        store
            .add_career(Career::new("cse", "Computer Science Engineering").with_description("Software and systems"))
            .unwrap();
        store.add_career(Career::new("me", "Mechanical Engineering")).unwrap();
        store.add_career(Career::new("ce", "Civil Engineering")).unwrap();
        store
    }

    fn record(store: &InMemoryStore, user: &str, results: &[(&str, i64)]) -> QuizAttempt {
        let results: IndexMap<String, i64> = results.iter().map(|(s, v)| (s.to_string(), *v)).collect();
        let recommendations = rank_careers(&results, 3);
        store
            .record_attempt(NewAttempt {
                user: Some(user.to_string()),
                results,
                recommendations,
                ..NewAttempt::default()
            })
            .unwrap()
    }

    #[test]
    fn test_summary_sums_across_attempts() {
        let store = store();
        record(&store, "alice", &[("cse", 5), ("me", 8)]);
        record(&store, "alice", &[("cse", 6), ("ce", 2)]);
        record(&store, "bob", &[("ce", 50)]);

        let summary = summarize_attempts(&store, "alice", 3).unwrap();

        assert_eq!(summary.attempts, 2);
        let totals: Vec<(&str, i64)> = summary
            .top_careers
            .iter()
            .map(|e| (e.slug.as_str(), e.total_score))
            .collect();
        assert_eq!(totals, vec![("cse", 11), ("me", 8), ("ce", 2)]);
        assert_eq!(summary.top_careers[0].name, "Computer Science Engineering");
        assert_eq!(summary.top_careers[0].description, "Software and systems");
    }

    fn attempt_at(id: u64, timestamp: &str, slug: &str, score: i64) -> QuizAttempt {
        let results: IndexMap<String, i64> = IndexMap::from([(slug.to_string(), score)]);
        QuizAttempt {
            id,
            user: Some("alice".to_string()),
            timestamp: timestamp.parse::<DateTime<Utc>>().unwrap(),
            academic_level: None,
            stream: None,
            recommendations: rank_careers(&results, 3),
            results,
        }
    }

    #[test]
    fn test_summary_ties_go_to_newest_attempt() {
        let bank = QuizBank {
            careers: store().snapshot().unwrap().careers,
            attempts: vec![
                attempt_at(1, "2026-01-10T09:00:00Z", "me", 5),
                attempt_at(2, "2026-03-10T09:00:00Z", "cse", 5),
                attempt_at(3, "2026-02-10T09:00:00Z", "ce", 5),
            ],
            ..QuizBank::default()
        };
        let store = InMemoryStore::from_bank(bank).unwrap();

        let summary = summarize_attempts(&store, "alice", 3).unwrap();

        // neither id order nor insertion order
        let slugs: Vec<&str> = summary.top_careers.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["cse", "ce", "me"]);
        assert!(summary.top_careers.iter().all(|e| e.total_score == 5));
    }

    #[test]
    fn test_summary_skips_unknown_careers() {
        let store = store();
        record(&store, "alice", &[("astronaut", 20), ("me", 4)]);

        let summary = summarize_attempts(&store, "alice", 3).unwrap();
        let slugs: Vec<&str> = summary.top_careers.iter().map(|e| e.slug.as_str()).collect();
        assert_eq!(slugs, vec!["me"]);
    }

    #[test]
    fn test_summary_without_history() {
        let store = store();
        let summary = summarize_attempts(&store, "alice", 3).unwrap();
        assert_eq!(summary.attempts, 0);
        assert!(summary.top_careers.is_empty());
    }

    #[test]
    fn test_compare_enriches_with_catalogue() {
        let store = store();
        let first = record(&store, "alice", &[("cse", 5)]);
        let second = record(&store, "alice", &[("ghost", 2)]);

        let comparison = compare_attempts(&store, "alice", first.id, second.id).unwrap();

        assert_eq!(comparison.first.recommendations[0].name, "Computer Science Engineering");
        assert!(comparison.first.recommendations[0].career.is_some());
        assert_eq!(
            comparison.second.recommendations[0],
            ComparedCareer {
                slug: "ghost".to_string(),
                name: "Ghost".to_string(),
                score: 2,
                career: None,
            }
        );
    }

    #[test]
    fn test_compare_rejects_foreign_attempts() {
        let store = store();
        let mine = record(&store, "alice", &[("cse", 5)]);
        let theirs = record(&store, "bob", &[("me", 5)]);

        let err = compare_attempts(&store, "alice", mine.id, theirs.id).unwrap_err();
        assert!(matches!(err, CareerAdvisorError::AttemptNotFound(id) if id == theirs.id));
        assert!(matches!(
            compare_attempts(&store, "alice", mine.id, 999),
            Err(CareerAdvisorError::AttemptNotFound(999))
        ));
    }

    #[test]
    fn test_recommendation_names_survive_without_catalogue() {
        let attempt = QuizAttempt {
            id: 1,
            user: Some("alice".to_string()),
            timestamp: Utc::now(),
            academic_level: None,
            stream: None,
            results: IndexMap::new(),
            recommendations: vec![RankedCareer {
                slug: "it".to_string(),
                name: "It".to_string(),
                score: 3,
            }],
        };
        let view = view(&[], attempt);
        assert_eq!(view.recommendations[0].name, "It");
    }
}

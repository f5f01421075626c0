//! Secondary views over a user's answers: category tally, dislikes and quiz stats

use crate::error::Result;
use crate::model::{Career, ChoiceLabel, QuestionCategory};
use crate::scoring::choice_weights::ChoiceWeightTable;
use crate::scoring::ranking::rank_descending;
use crate::store::QuizRepository;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: QuestionCategory,
    pub score: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTally {
    pub total_questions_answered: usize,
    pub ranking: Vec<CategoryScore>,
}

/// Sum the ordinal weights of a user's answers per category, best first.
///
/// Only categories the user answered appear, in first-seen order before
/// ranking. Answers to field-based or missing questions only count toward
/// the total.
pub fn tally_categories<R: QuizRepository>(
    repository: &R,
    weights: &ChoiceWeightTable,
    user: &str,
) -> Result<CategoryTally> {
    let answers = repository.answers_for_user(user)?;
    let mut ranking: Vec<CategoryScore> = Vec::new();

    for answer in &answers {
        let Some(category) = repository.question(answer.question_id)?.and_then(|q| q.category()) else {
            continue;
        };
        let weight = weights.weight(Some(category), &answer.choice);
        match ranking.iter_mut().find(|e| e.category == category) {
            Some(entry) => {
                entry.score += weight;
                entry.count += 1;
            }
            None => ranking.push(CategoryScore {
                category,
                score: weight,
                count: 1,
            }),
        }
    }

    rank_descending(&mut ranking, |e| e.score);
    Ok(CategoryTally {
        total_questions_answered: answers.len(),
        ranking,
    })
}

/// Careers the user said they do not want, in catalogue order
pub fn disliked_careers<R: QuizRepository>(repository: &R, user: &str) -> Result<Vec<Career>> {
    let mut negative_texts = Vec::new();
    for answer in repository.answers_for_user(user)? {
        if !answer.label().is_some_and(|label| label.is_negative()) {
            continue;
        }
        if let Some(question) = repository.question(answer.question_id)? {
            if question.category() == Some(QuestionCategory::Career) {
                negative_texts.push(question.text.to_lowercase());
            }
        }
    }

    let disliked: Vec<Career> = repository
        .careers()?
        .into_iter()
        .filter(|career| {
            let name = career.name.trim().to_lowercase();
            !name.is_empty() && negative_texts.iter().any(|text| text.contains(&name))
        })
        .collect();

    debug!("'{}' dislikes {} careers", user, disliked.len());
    Ok(disliked)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub total_questions: usize,
    pub interest: usize,
    pub degree: usize,
    pub career: usize,
    pub field_based: usize,
    pub choice_options: Vec<String>,
}

pub fn quiz_stats<R: QuizRepository>(repository: &R) -> Result<QuizStats> {
    let questions = repository.questions()?;
    let mut per_category: HashMap<QuestionCategory, usize> = HashMap::new();
    let mut field_based = 0;

    for question in &questions {
        match question.category() {
            Some(category) => *per_category.entry(category).or_insert(0) += 1,
            None => field_based += 1,
        }
    }

    let count = |category: QuestionCategory| per_category.get(&category).copied().unwrap_or(0);
    Ok(QuizStats {
        total_questions: questions.len(),
        interest: count(QuestionCategory::Interest),
        degree: count(QuestionCategory::Degree),
        career: count(QuestionCategory::Career),
        field_based,
        choice_options: ChoiceLabel::ALL.iter().map(|l| l.display_name().to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Choice, Question};
    use crate::store::InMemoryStore;

    fn store() -> InMemoryStore {
        let store = InMemoryStore::new();
        for career in [
            Career::new("doctor", "Doctor"),
            Career::new("lawyer", "Lawyer"),
            Career::new("pilot", "Pilot"),
        ] {
            store.add_career(career).unwrap();
        }
        let questions = [
            Question::categorized(1, "Do you enjoy biology?", QuestionCategory::Interest),
            Question::categorized(2, "What do you think about MBBS?", QuestionCategory::Degree),
            Question::categorized(3, "Would you enjoy being a Doctor or a Lawyer?", QuestionCategory::Career),
            Question::categorized(4, "Would you enjoy being a Pilot?", QuestionCategory::Career),
            Question::categorized(5, "Do you like helping people, like a doctor?", QuestionCategory::Interest),
            Question::field_based(6, "Pick a subject", "Engineering", vec![Choice::new(1, "Physics", &[("me", 5)])]),
        ];
        for question in questions {
            store.add_question(question).unwrap();
        }
        store
    }

    #[test]
    fn test_tally_uses_category_weights() {
        let store = store();
        store.upsert_answer("alice", 1, "like").unwrap();
        store.upsert_answer("alice", 2, "strongly_like").unwrap();
        store.upsert_answer("alice", 3, "dislike").unwrap();
        store.upsert_answer("alice", 6, "like").unwrap();

        let tally = tally_categories(&store, &ChoiceWeightTable::default(), "alice").unwrap();

        assert_eq!(tally.total_questions_answered, 4);
        let ranking: Vec<(QuestionCategory, f64, usize)> =
            tally.ranking.iter().map(|e| (e.category, e.score, e.count)).collect();
        assert_eq!(
            ranking,
            vec![
                (QuestionCategory::Interest, 1.0, 1),
                (QuestionCategory::Degree, 1.0, 1),
                (QuestionCategory::Career, -1.0, 1),
            ]
        );
    }

    #[test]
    fn test_tally_without_answers() {
        let store = store();
        let tally = tally_categories(&store, &ChoiceWeightTable::default(), "nobody").unwrap();
        assert_eq!(tally.total_questions_answered, 0);
        assert!(tally.ranking.is_empty());
    }

    #[test]
    fn test_tally_leaves_out_unanswered_categories() {
        let store = store();
        store.upsert_answer("alice", 2, "dislike").unwrap();

        let tally = tally_categories(&store, &ChoiceWeightTable::default(), "alice").unwrap();

        assert_eq!(
            tally.ranking,
            vec![CategoryScore {
                category: QuestionCategory::Degree,
                score: -0.5,
                count: 1,
            }]
        );
    }

    #[test]
    fn test_tally_ties_keep_first_answered_category() {
        let store = store();
        store.upsert_answer("alice", 3, "like").unwrap();
        store.upsert_answer("alice", 1, "like").unwrap();

        let tally = tally_categories(&store, &ChoiceWeightTable::default(), "alice").unwrap();
        let order: Vec<QuestionCategory> = tally.ranking.iter().map(|e| e.category).collect();
        assert_eq!(order, vec![QuestionCategory::Career, QuestionCategory::Interest]);
    }

    #[test]
    fn test_disliked_careers() {
        let store = store();
        store.upsert_answer("alice", 3, "hate_it").unwrap();
        store.upsert_answer("alice", 4, "like").unwrap();
        // negative answers outside the career category do not count
        store.upsert_answer("alice", 5, "strongly_dislike").unwrap();

        let slugs: Vec<String> = disliked_careers(&store, "alice")
            .unwrap()
            .into_iter()
            .map(|c| c.slug)
            .collect();
        assert_eq!(slugs, vec!["doctor".to_string(), "lawyer".to_string()]);
    }

    #[test]
    fn test_quiz_stats() {
        let stats = quiz_stats(&store()).unwrap();
        assert_eq!(stats.total_questions, 6);
        assert_eq!((stats.interest, stats.degree, stats.career, stats.field_based), (2, 1, 2, 1));
        assert_eq!(stats.choice_options.len(), 7);
        assert_eq!(stats.choice_options[0], "Strongly Dislike");
    }
}

//! Keyword-match sub-scorer: relates free-text questions to a career

use crate::error::{CareerAdvisorError, Result};
use crate::model::{Career, QuestionCategory, QuestionId};
use aho_corasick::AhoCorasick;
use serde::{Deserialize, Serialize};

/// A set of keywords searched as case-insensitive substrings.
///
/// When several keywords occur in one text the one listed first wins.
pub struct KeywordSet {
    keywords: Vec<String>,
    matcher: Option<AhoCorasick>,
}

impl KeywordSet {
    pub fn new(keywords: &[String]) -> Result<Self> {
        // An empty keyword would match every text
        let keywords: Vec<String> = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = if keywords.is_empty() {
            None
        } else {
            Some(AhoCorasick::new(&keywords).map_err(|e| {
                CareerAdvisorError::Analysis(format!("Failed to build keyword matcher: {}", e))
            })?)
        };

        Ok(Self { keywords, matcher })
    }

    /// First keyword (in list order) contained in `lowered_text`, which must already be lowercase
    pub fn first_match(&self, lowered_text: &str) -> Option<&str> {
        let matcher = self.matcher.as_ref()?;
        matcher
            .find_overlapping_iter(lowered_text)
            .map(|m| m.pattern().as_usize())
            .min()
            .map(|index| self.keywords[index].as_str())
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

/// Pre-built matchers for one career
pub struct CareerKeywords {
    name: String,
    interest: KeywordSet,
    degree: KeywordSet,
    skills: KeywordSet,
}

impl CareerKeywords {
    pub fn for_career(career: &Career) -> Result<Self> {
        Ok(Self {
            name: career.name.trim().to_lowercase(),
            interest: KeywordSet::new(&career.interest_keywords)?,
            degree: KeywordSet::new(&career.degree_requirements)?,
            skills: KeywordSet::new(&career.required_skills)?,
        })
    }
}

/// An answered categorized question, prepared for matching
#[derive(Debug, Clone)]
pub struct ScoredAnswer {
    pub question_id: QuestionId,
    pub category: QuestionCategory,
    pub lowered_text: String,
    pub weight: f64,
}

impl ScoredAnswer {
    pub fn new(question_id: QuestionId, category: QuestionCategory, text: &str, weight: f64) -> Self {
        Self {
            question_id,
            category,
            lowered_text: text.to_lowercase(),
            weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Keyword,
    CareerName,
    Skill,
}

/// Which keyword tied a question to a career, and what it contributed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordHit {
    pub question_id: QuestionId,
    pub category: QuestionCategory,
    pub keyword: String,
    pub kind: HitKind,
    pub contribution: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScore {
    /// In [0, 10]; 0 when nothing matched
    pub value: f64,
    pub hits: Vec<KeywordHit>,
}

pub struct KeywordScorer {
    skill_match_factor: f64,
}

impl KeywordScorer {
    pub fn new(skill_match_factor: f64) -> Self {
        Self { skill_match_factor }
    }

    /// Average contribution of the matching answers of `category`, mapped onto 0..=10
    pub fn sub_score(&self, category: QuestionCategory, answers: &[ScoredAnswer], career: &CareerKeywords) -> SubScore {
        let hits: Vec<KeywordHit> = answers
            .iter()
            .filter(|a| a.category == category)
            .filter_map(|a| self.match_answer(a, career))
            .collect();

        if hits.is_empty() {
            return SubScore::default();
        }

        let average = hits.iter().map(|h| h.contribution).sum::<f64>() / hits.len() as f64;
        SubScore {
            value: normalize(average),
            hits,
        }
    }

    fn match_answer(&self, answer: &ScoredAnswer, career: &CareerKeywords) -> Option<KeywordHit> {
        let text = answer.lowered_text.as_str();
        let hit = |keyword: &str, kind: HitKind, contribution: f64| KeywordHit {
            question_id: answer.question_id,
            category: answer.category,
            keyword: keyword.to_string(),
            kind,
            contribution,
        };

        match answer.category {
            QuestionCategory::Interest => career
                .interest
                .first_match(text)
                .map(|k| hit(k, HitKind::Keyword, answer.weight)),
            QuestionCategory::Degree => career
                .degree
                .first_match(text)
                .map(|k| hit(k, HitKind::Keyword, answer.weight)),
            QuestionCategory::Career => {
                if !career.name.is_empty() && text.contains(&career.name) {
                    Some(hit(&career.name, HitKind::CareerName, answer.weight))
                } else {
                    career
                        .skills
                        .first_match(text)
                        .map(|k| hit(k, HitKind::Skill, answer.weight * self.skill_match_factor))
                }
            }
        }
    }
}

/// Map the natural -2..=2 weight range onto 0..=10
pub fn normalize(average: f64) -> f64 {
    ((average + 2.0) * 2.5).clamp(0.0, 10.0)
}

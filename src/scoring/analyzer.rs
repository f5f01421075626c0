//! Weighted category analyzer combining the interest, degree and career sub-scores

use crate::config::{Config, RankingConfig, ScoringConfig};
use crate::error::Result;
use crate::model::{Answer, Career, CareerRecommendation, QuestionCategory};
use crate::scoring::choice_weights::ChoiceWeightTable;
use crate::scoring::keyword_matcher::{CareerKeywords, KeywordHit, KeywordScorer, ScoredAnswer};
use crate::scoring::ranking::{rank_descending, top_n};
use crate::store::{QuizRepository, RecommendationSink};
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

/// Final score and explanation for one career
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerMatch {
    pub career: Career,
    /// Match score in [0, 100]
    pub score: f64,
    pub reasoning: String,
    pub breakdown: ScoreBreakdown,
}

/// The three sub-scores, each in [0, 10]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub interest: f64,
    pub degree: f64,
    pub career: f64,
    pub hits: Vec<KeywordHit>,
}

pub struct CareerAnalyzer {
    scoring: ScoringConfig,
    ranking: RankingConfig,
    choice_weights: ChoiceWeightTable,
    keyword_scorer: KeywordScorer,
}

impl CareerAnalyzer {
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: config.scoring.clone(),
            ranking: config.ranking.clone(),
            choice_weights: config.choice_weights.clone(),
            keyword_scorer: KeywordScorer::new(config.scoring.skill_match_factor),
        }
    }

    /// Analyze a user's stored answers and replace their persisted recommendations.
    ///
    /// Returns the top matches for display. A user without answers gets an
    /// empty list and their persisted set is left alone.
    pub fn analyze<S>(&self, store: &S, user: &str) -> Result<Vec<CareerMatch>>
    where
        S: QuizRepository + RecommendationSink,
    {
        let answers = store.answers_for_user(user)?;
        if answers.is_empty() {
            info!("No answers recorded for '{}'", user);
            return Ok(Vec::new());
        }

        let prepared = self.prepare_answers(store, &answers)?;
        let careers = store.careers()?;
        let ranked = self.rank_careers(&prepared, &careers)?;
        info!(
            "Analyzed {} answers by '{}' against {} careers: {} matches",
            prepared.len(),
            user,
            careers.len(),
            ranked.len()
        );

        let now = Utc::now();
        let persisted: Vec<CareerRecommendation> = ranked
            .iter()
            .take(self.ranking.persisted_top_n)
            .map(|m| CareerRecommendation {
                user: user.to_string(),
                career: m.career.slug.clone(),
                match_score: m.score,
                reasoning: m.reasoning.clone(),
                created_at: now,
            })
            .collect();
        store.replace_recommendations(user, persisted)?;

        Ok(top_n(ranked, self.ranking.display_top_n))
    }

    /// Resolve questions and translate choices into weights.
    ///
    /// Answers whose question is missing or not categorized are left out.
    pub fn prepare_answers<R: QuizRepository>(&self, repository: &R, answers: &[Answer]) -> Result<Vec<ScoredAnswer>> {
        let mut prepared = Vec::with_capacity(answers.len());
        for answer in answers {
            let Some(question) = repository.question(answer.question_id)? else {
                warn!("Answer by '{}' references missing question {}", answer.user, answer.question_id);
                continue;
            };
            let Some(category) = question.category() else {
                debug!("Question {} is field-based; not keyword scored", question.id);
                continue;
            };
            let weight = self.choice_weights.full_scale_weight(&answer.choice);
            prepared.push(ScoredAnswer::new(question.id, category, &question.text, weight));
        }
        Ok(prepared)
    }

    /// Score every career and keep the positive ones, best first
    pub fn rank_careers(&self, answers: &[ScoredAnswer], careers: &[Career]) -> Result<Vec<CareerMatch>> {
        let mut matches = Vec::new();
        for career in careers {
            let career_match = self.score_career(answers, career)?;
            debug!("{}: {:.1} ({})", career.slug, career_match.score, career_match.reasoning);
            if career_match.score > 0.0 {
                matches.push(career_match);
            }
        }
        rank_descending(&mut matches, |m| m.score);
        Ok(matches)
    }

    pub fn score_career(&self, answers: &[ScoredAnswer], career: &Career) -> Result<CareerMatch> {
        let keywords = CareerKeywords::for_career(career)?;
        let interest = self.keyword_scorer.sub_score(QuestionCategory::Interest, answers, &keywords);
        let degree = self.keyword_scorer.sub_score(QuestionCategory::Degree, answers, &keywords);
        let career_pref = self.keyword_scorer.sub_score(QuestionCategory::Career, answers, &keywords);

        let score = self.combine(interest.value, degree.value, career_pref.value);
        let reasoning = reasoning(interest.value, degree.value, career_pref.value);

        let mut hits = interest.hits;
        hits.extend(degree.hits);
        hits.extend(career_pref.hits);

        Ok(CareerMatch {
            career: career.clone(),
            score,
            reasoning,
            breakdown: ScoreBreakdown {
                interest: interest.value,
                degree: degree.value,
                career: career_pref.value,
                hits,
            },
        })
    }

    /// Weighted sum of the 0..=10 sub-scores, scaled to 0..=100
    fn combine(&self, interest: f64, degree: f64, career: f64) -> f64 {
        let raw = interest * self.scoring.interest_weight
            + degree * self.scoring.degree_weight
            + career * self.scoring.career_weight;
        ((raw / 10.0) * 100.0).clamp(0.0, 100.0)
    }
}

fn reasoning(interest: f64, degree: f64, career: f64) -> String {
    let mut parts = Vec::new();
    if interest > 0.0 {
        parts.push(format!("Strong interest alignment ({:.1}/10)", interest));
    }
    if degree > 0.0 {
        parts.push(format!("Educational path match ({:.1}/10)", degree));
    }
    if career > 0.0 {
        parts.push(format!("Career preference match ({:.1}/10)", career));
    }

    if parts.is_empty() {
        "Limited data available".to_string()
    } else {
        parts.join("; ")
    }
}

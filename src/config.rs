//! Configuration management for the career advisor

use crate::error::{CareerAdvisorError, Result};
use crate::scoring::choice_weights::ChoiceWeightTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub ranking: RankingConfig,
    pub choice_weights: ChoiceWeightTable,
    pub output: OutputConfig,
}

/// Weights of the three keyword sub-scores in the final match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub interest_weight: f64,
    pub degree_weight: f64,
    pub career_weight: f64,
    /// Multiplier for a career question that only matches one of the required skills
    pub skill_match_factor: f64,
}

/// How many careers each surface keeps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    pub quiz_top_n: usize,
    pub display_top_n: usize,
    pub persisted_top_n: usize,
    pub summary_top_n: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            interest_weight: 0.4,
            degree_weight: 0.3,
            career_weight: 0.3,
            skill_match_factor: 0.5,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            quiz_top_n: 3,
            display_top_n: 5,
            persisted_top_n: 10,
            summary_top_n: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            ranking: RankingConfig::default(),
            choice_weights: ChoiceWeightTable::default(),
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load an explicit configuration file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| CareerAdvisorError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CareerAdvisorError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("career-advisor")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("scoring.interest_weight", self.scoring.interest_weight),
            ("scoring.degree_weight", self.scoring.degree_weight),
            ("scoring.career_weight", self.scoring.career_weight),
            ("scoring.skill_match_factor", self.scoring.skill_match_factor),
        ];
        for (key, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(CareerAdvisorError::Configuration(format!(
                    "{} must be a non-negative number, got {}",
                    key, value
                )));
            }
        }

        if self.total_weight() <= 0.0 {
            return Err(CareerAdvisorError::Configuration(
                "scoring weights must not all be zero".to_string(),
            ));
        }

        if self.choice_weights.all_weights().any(|w| !w.is_finite()) {
            return Err(CareerAdvisorError::Configuration(
                "choice_weights must be finite numbers".to_string(),
            ));
        }

        let limits = [
            ("ranking.quiz_top_n", self.ranking.quiz_top_n),
            ("ranking.display_top_n", self.ranking.display_top_n),
            ("ranking.persisted_top_n", self.ranking.persisted_top_n),
            ("ranking.summary_top_n", self.ranking.summary_top_n),
        ];
        for (key, value) in limits {
            if value == 0 {
                return Err(CareerAdvisorError::Configuration(format!("{} must be at least 1", key)));
            }
        }

        Ok(())
    }

    /// Sum of the three sub-score weights
    pub fn total_weight(&self) -> f64 {
        self.scoring.interest_weight + self.scoring.degree_weight + self.scoring.career_weight
    }
}

//! Career catalogue entries

use crate::error::{CareerAdvisorError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthProspect {
    Low,
    Medium,
    High,
    VeryHigh,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CareerMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_prospects: Option<GrowthProspect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_environment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pros: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Career {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub interest_keywords: Vec<String>,
    #[serde(default)]
    pub degree_requirements: Vec<String>,
    #[serde(default)]
    pub metadata: CareerMetadata,
}

impl Career {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            category: String::new(),
            description: String::new(),
            required_skills: Vec::new(),
            interest_keywords: Vec::new(),
            degree_requirements: Vec::new(),
            metadata: CareerMetadata::default(),
        }
    }

    pub fn with_interest_keywords(mut self, keywords: &[&str]) -> Self {
        self.interest_keywords = keywords.iter().map(|k| k.to_string()).collect();
        self
    }

    pub fn with_degree_requirements(mut self, degrees: &[&str]) -> Self {
        self.degree_requirements = degrees.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_required_skills(mut self, skills: &[&str]) -> Self {
        self.required_skills = skills.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

fn slug_regex() -> &'static Regex {
    static SLUG: OnceLock<Regex> = OnceLock::new();
    SLUG.get_or_init(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("Invalid slug regex"))
}

/// Career slugs are lowercase words joined by single hyphens, e.g. `data-scientist`
pub fn validate_slug(slug: &str) -> Result<()> {
    if slug_regex().is_match(slug) {
        Ok(())
    } else {
        Err(CareerAdvisorError::Dataset(format!("Invalid career slug: '{}'", slug)))
    }
}

//! Error handling for the career advisor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CareerAdvisorError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Question not found: {0}")]
    QuestionNotFound(u64),

    #[error("Quiz attempt not found: {0}")]
    AttemptNotFound(u64),

    #[error("Persistence rejected: {0}")]
    Persistence(String),

    #[error("Analysis failed: {0}")]
    Analysis(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

pub type Result<T> = std::result::Result<T, CareerAdvisorError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for CareerAdvisorError {
    fn from(err: anyhow::Error) -> Self {
        CareerAdvisorError::Analysis(err.to_string())
    }
}

impl From<toml::de::Error> for CareerAdvisorError {
    fn from(err: toml::de::Error) -> Self {
        CareerAdvisorError::Dataset(err.to_string())
    }
}

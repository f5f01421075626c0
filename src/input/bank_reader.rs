//! Reading and writing quiz data files in their supported formats

use crate::error::{CareerAdvisorError, Result};
use crate::input::file_detector::FileType;
use crate::model::QuizBank;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::fs;

pub trait BankReader {
    fn read_bank(&self, path: &Path) -> impl std::future::Future<Output = Result<QuizBank>> + Send;
}

pub struct JsonBankReader;

impl BankReader for JsonBankReader {
    async fn read_bank(&self, path: &Path) -> Result<QuizBank> {
        let content = fs::read_to_string(path).await?;
        decode(FileType::Json, &content).map_err(|e| with_path(e, path))
    }
}

pub struct TomlBankReader;

impl BankReader for TomlBankReader {
    async fn read_bank(&self, path: &Path) -> Result<QuizBank> {
        let content = fs::read_to_string(path).await?;
        decode(FileType::Toml, &content).map_err(|e| with_path(e, path))
    }
}

fn with_path(err: CareerAdvisorError, path: &Path) -> CareerAdvisorError {
    match err {
        CareerAdvisorError::Dataset(msg) => {
            CareerAdvisorError::Dataset(format!("Failed to parse '{}': {}", path.display(), msg))
        }
        CareerAdvisorError::Serialization(e) => {
            CareerAdvisorError::Dataset(format!("Failed to parse '{}': {}", path.display(), e))
        }
        other => other,
    }
}

/// Parse `content` as a document of the given type
pub fn decode<T: DeserializeOwned>(file_type: FileType, content: &str) -> Result<T> {
    match file_type {
        FileType::Json => Ok(serde_json::from_str(content)?),
        FileType::Toml => Ok(toml::from_str(content)?),
        FileType::Unknown => Err(CareerAdvisorError::UnsupportedFormat(
            "expected a .json or .toml file".to_string(),
        )),
    }
}

/// Render `value` as a document of the given type
pub fn encode<T: Serialize>(file_type: FileType, value: &T) -> Result<String> {
    match file_type {
        FileType::Json => Ok(serde_json::to_string_pretty(value)?),
        FileType::Toml => toml::to_string_pretty(value)
            .map_err(|e| CareerAdvisorError::Dataset(format!("Failed to serialize TOML: {}", e))),
        FileType::Unknown => Err(CareerAdvisorError::UnsupportedFormat(
            "expected a .json or .toml file".to_string(),
        )),
    }
}

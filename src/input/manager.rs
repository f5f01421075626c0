//! Bank manager: loads, caches and writes back quiz data files

use crate::error::{CareerAdvisorError, Result};
use crate::input::bank_reader::{decode, encode, BankReader, JsonBankReader, TomlBankReader};
use crate::input::file_detector::FileType;
use crate::model::{AnswerSheet, AnswerSubmission, ChoiceId, QuizBank};
use indexmap::IndexMap;
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tokio::fs;

pub struct BankManager {
    cache: HashMap<String, QuizBank>,
}

impl BankManager {
    pub fn new() -> Self {
        Self { cache: HashMap::new() }
    }

    /// Read and validate a quiz bank
    pub async fn load_bank(&mut self, path: &Path) -> Result<QuizBank> {
        let path_str = path.to_string_lossy().to_string();

        if let Some(cached) = self.cache.get(&path_str) {
            info!("Using cached quiz bank for: {}", path.display());
            return Ok(cached.clone());
        }

        let file_type = self.detect_file_type(path)?;
        let mut bank = match file_type {
            FileType::Json => {
                info!("Loading JSON quiz bank: {}", path.display());
                JsonBankReader.read_bank(path).await?
            }
            FileType::Toml => {
                info!("Loading TOML quiz bank: {}", path.display());
                TomlBankReader.read_bank(path).await?
            }
            FileType::Unknown => {
                return Err(CareerAdvisorError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };
        bank.validate()?;
        info!(
            "Loaded {} careers, {} questions and {} answers",
            bank.careers.len(),
            bank.questions.len(),
            bank.answers.len()
        );

        self.cache.insert(path_str, bank.clone());
        Ok(bank)
    }

    /// Write `bank` to `path` in the format its extension names
    pub async fn save_bank(&mut self, path: &Path, bank: &QuizBank) -> Result<()> {
        let file_type = FileType::from_path(path);
        let content = encode(file_type, bank)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(path, content).await?;
        info!("Saved quiz bank to: {}", path.display());

        self.cache.insert(path.to_string_lossy().to_string(), bank.clone());
        Ok(())
    }

    /// Read a question id to choice map; choices may be ids or texts
    pub async fn load_answer_sheet(&self, path: &Path) -> Result<AnswerSheet> {
        let file_type = self.detect_file_type(path)?;
        let content = fs::read_to_string(path).await?;
        let raw: IndexMap<String, ChoiceRef> = decode(file_type, &content)?;
        Ok(raw.into_iter().map(|(question, choice)| (question, choice.into_string())).collect())
    }

    /// Read a batch of answer submissions, either a bare list or an `answers` table
    pub async fn load_submissions(&self, path: &Path) -> Result<Vec<AnswerSubmission>> {
        let file_type = self.detect_file_type(path)?;
        let content = fs::read_to_string(path).await?;
        let file: SubmissionFile = decode(file_type, &content)?;
        Ok(match file {
            SubmissionFile::List(entries) => entries,
            SubmissionFile::Table { answers } => answers,
        })
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        if !path.exists() {
            return Err(CareerAdvisorError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| CareerAdvisorError::InvalidInput(format!("File has no extension: {}", path.display())))?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

impl Default for BankManager {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ChoiceRef {
    Id(ChoiceId),
    Text(String),
}

impl ChoiceRef {
    fn into_string(self) -> String {
        match self {
            ChoiceRef::Id(id) => id.to_string(),
            ChoiceRef::Text(text) => text,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SubmissionFile {
    List(Vec<AnswerSubmission>),
    Table { answers: Vec<AnswerSubmission> },
}

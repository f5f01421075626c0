//! CLI interface for the career advisor

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "career-advisor")]
#[command(about = "Quiz-driven career recommendation engine")]
#[command(long_about = "Score career quizzes, rank careers against a user's answers and track quiz history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Options shared by every reporting command
#[derive(Args, Clone)]
pub struct ReportArgs {
    /// Output format: console, json, markdown
    #[arg(short, long)]
    pub output: Option<String>,

    /// Save output to file
    #[arg(short, long)]
    pub save: Option<PathBuf>,

    /// Include score breakdowns
    #[arg(short, long)]
    pub detailed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a field-based answer sheet by summing choice points
    Score {
        /// Quiz bank file (JSON, TOML)
        #[arg(short, long)]
        bank: PathBuf,

        /// Answer sheet mapping question ids to choice ids or texts
        #[arg(short, long)]
        answers: PathBuf,

        /// Number of careers to recommend
        #[arg(short, long)]
        top: Option<usize>,

        /// User the attempt belongs to
        #[arg(short, long)]
        user: Option<String>,

        /// Academic level recorded with the attempt
        #[arg(long)]
        level: Option<String>,

        /// Stream recorded with the attempt
        #[arg(long)]
        stream: Option<String>,

        /// Record the attempt and write the bank back
        #[arg(long)]
        record: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Save a batch of answers to categorized questions
    Submit {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        /// List of {question, choice} entries
        #[arg(short, long)]
        answers: PathBuf,

        /// Clear the user's earlier answers first
        #[arg(long)]
        reset: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Rank careers against a user's stored answers
    Analyze {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        /// Write the replaced recommendation set back to the bank
        #[arg(long)]
        persist: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Top careers across all of a user's quiz attempts
    Summary {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Compare two quiz attempts side by side
    Compare {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        /// First attempt id
        first: u64,

        /// Second attempt id
        second: u64,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Per-category preference totals
    Tally {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Careers the user answered negatively about
    Dislikes {
        #[arg(short, long)]
        bank: PathBuf,

        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Question counts of a quiz bank
    Stats {
        #[arg(short, long)]
        bank: PathBuf,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

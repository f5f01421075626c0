//! Output formatters: console, JSON and Markdown renderings of a report

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{CareerAdvisorError, Result};
use crate::output::report::*;
use crate::scoring::{AnswerOutcome, AttemptComparison, AttemptSummary, CareerMatch, CategoryTally, QuizStats};
use crate::model::{Career, SubmissionReport};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for scripting and structured data
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for saved reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, score: f64) -> String {
        let strength = MatchStrength::from_score(score);
        let color = match strength {
            MatchStrength::Excellent => Color::Green,
            MatchStrength::Strong => Color::BrightGreen,
            MatchStrength::Moderate => Color::Yellow,
            MatchStrength::Weak => Color::Red,
        };

        if self.use_colors {
            format!("[{}]", strength.label().color(color).bold())
        } else {
            format!("[{}]", strength.label())
        }
    }

    fn format_analysis(&self, matches: &[CareerMatch], output: &mut String) {
        output.push_str(&self.format_header("Top Career Matches", 2));
        if matches.is_empty() {
            output.push_str("No matching careers. Answer more questions and try again.\n");
            return;
        }

        for (i, m) in matches.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} {:.1}% {}\n",
                i + 1,
                self.colorize(&m.career.name, Color::Cyan),
                m.score,
                self.format_score_badge(m.score)
            ));
            output.push_str(&format!("   {}\n", m.reasoning));

            if self.detailed {
                output.push_str(&format!(
                    "   interest {:.1} | degree {:.1} | career {:.1}\n",
                    m.breakdown.interest, m.breakdown.degree, m.breakdown.career
                ));
                for hit in &m.breakdown.hits {
                    output.push_str(&format!(
                        "     q{} [{}] '{}' {:+.1}\n",
                        hit.question_id, hit.category, hit.keyword, hit.contribution
                    ));
                }
            }
        }
    }

    fn format_quiz(&self, quiz: &QuizReport, output: &mut String) {
        output.push_str(&self.format_header("Recommended Fields", 2));
        for (i, career) in quiz.outcome.top.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({} points)\n",
                i + 1,
                self.colorize(&career.name, Color::Cyan),
                career.score
            ));
        }

        if self.detailed {
            output.push_str(&self.format_header("All Totals", 3));
            for (slug, score) in &quiz.outcome.raw_scores {
                output.push_str(&format!("  {}: {}\n", slug, score));
            }
        }

        let skipped: Vec<&AnswerOutcome> = quiz.outcome.skipped().collect();
        if !skipped.is_empty() {
            output.push_str(&self.format_header("Skipped Answers", 3));
            for outcome in skipped {
                if let AnswerOutcome::Skipped { question, choice, reason } = outcome {
                    output.push_str(&format!(
                        "  {} {} -> {}: {}\n",
                        self.colorize("!", Color::Yellow),
                        question,
                        choice,
                        reason
                    ));
                }
            }
        }

        if let Some(id) = quiz.attempt_id {
            output.push_str(&format!("\nRecorded as attempt #{}\n", id));
        }
    }

    fn format_summary(&self, summary: &AttemptSummary, output: &mut String) {
        output.push_str(&self.format_header(&format!("Across {} attempts", summary.attempts), 2));
        if summary.top_careers.is_empty() {
            output.push_str("No quiz history yet.\n");
        }
        for (i, entry) in summary.top_careers.iter().enumerate() {
            output.push_str(&format!(
                "{}. {} ({} points)\n",
                i + 1,
                self.colorize(&entry.name, Color::Cyan),
                entry.total_score
            ));
            if !entry.description.is_empty() {
                output.push_str(&format!("   {}\n", entry.description));
            }
        }
    }

    fn format_comparison(&self, comparison: &AttemptComparison, output: &mut String) {
        for attempt in [&comparison.first, &comparison.second] {
            output.push_str(&self.format_header(
                &format!("Attempt #{} ({})", attempt.id, attempt.timestamp.format("%Y-%m-%d %H:%M")),
                2,
            ));
            for (i, career) in attempt.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {} ({} points)\n", i + 1, career.name, career.score));
                if self.detailed {
                    if let Some(salary) = career.career.as_ref().and_then(|c| c.metadata.salary_range.as_deref()) {
                        output.push_str(&format!("   Salary: {}\n", salary));
                    }
                }
            }
        }
    }

    fn format_tally(&self, tally: &CategoryTally, output: &mut String) {
        output.push_str(&self.format_header("Category Preferences", 2));
        output.push_str(&format!("Questions answered: {}\n", tally.total_questions_answered));
        for entry in &tally.ranking {
            let color = if entry.score > 0.0 {
                Color::Green
            } else if entry.score < 0.0 {
                Color::Red
            } else {
                Color::White
            };
            output.push_str(&format!(
                "  {:<10} {} ({} answers)\n",
                entry.category.as_str(),
                self.colorize(&format!("{:+.1}", entry.score), color),
                entry.count
            ));
        }
    }

    fn format_dislikes(&self, careers: &[Career], output: &mut String) {
        output.push_str(&self.format_header("Careers You Ruled Out", 2));
        if careers.is_empty() {
            output.push_str("None.\n");
        }
        for career in careers {
            output.push_str(&format!("  {} {}\n", self.colorize("✗", Color::Red), career.name));
        }
    }

    fn format_stats(&self, stats: &QuizStats, output: &mut String) {
        output.push_str(&self.format_header("Quiz Statistics", 2));
        output.push_str(&format!("Total questions: {}\n", stats.total_questions));
        output.push_str(&format!("  Interest: {}\n", stats.interest));
        output.push_str(&format!("  Degree: {}\n", stats.degree));
        output.push_str(&format!("  Career: {}\n", stats.career));
        output.push_str(&format!("  Field-based: {}\n", stats.field_based));
        output.push_str(&format!("Choice options: {}\n", stats.choice_options.join(", ")));
    }

    fn format_submission(&self, submission: &SubmissionReport, output: &mut String) {
        output.push_str(&self.format_header("Answer Submission", 2));
        output.push_str(&format!(
            "{} answers saved\n",
            self.colorize(&submission.total_submitted.to_string(), Color::Green)
        ));
        for error in &submission.errors {
            output.push_str(&format!("  {} {}\n", self.colorize("!", Color::Red), error));
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header(&report.metadata.title.to_uppercase(), 1));
        let user = report
            .metadata
            .user
            .as_deref()
            .map(|u| format!("User: {} | ", u))
            .unwrap_or_default();
        output.push_str(&format!(
            "{}Generated: {}\n",
            user,
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        match &report.body {
            ReportBody::Analysis(matches) => self.format_analysis(matches, &mut output),
            ReportBody::Quiz(quiz) => self.format_quiz(quiz, &mut output),
            ReportBody::Summary(summary) => self.format_summary(summary, &mut output),
            ReportBody::Comparison(comparison) => self.format_comparison(comparison, &mut output),
            ReportBody::Tally(tally) => self.format_tally(tally, &mut output),
            ReportBody::Dislikes(careers) => self.format_dislikes(careers, &mut output),
            ReportBody::Stats(stats) => self.format_stats(stats, &mut output),
            ReportBody::Submission(submission) => self.format_submission(submission, &mut output),
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        };
        json.map_err(|e| CareerAdvisorError::OutputFormatting(format!("Failed to serialize report: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn markdown_score_badge(score: f64) -> &'static str {
        match MatchStrength::from_score(score) {
            MatchStrength::Excellent => "🟢 Excellent",
            MatchStrength::Strong => "🟡 Strong",
            MatchStrength::Moderate => "🟠 Moderate",
            MatchStrength::Weak => "🔴 Weak",
        }
    }

    fn ranked_table(rows: impl Iterator<Item = (String, i64)>) -> String {
        let mut output = String::from("| # | Career | Points |\n|---|--------|--------|\n");
        for (i, (name, score)) in rows.enumerate() {
            output.push_str(&format!("| {} | {} | {} |\n", i + 1, name, score));
        }
        output
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        let mut output = format!("# {}\n\n", report.metadata.title);

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {}\n\n",
                report.metadata.generated_at.format("%B %d, %Y at %H:%M UTC")
            ));
            if let Some(user) = &report.metadata.user {
                output.push_str(&format!("**User:** `{}` | ", user));
            }
            output.push_str(&format!("**Quiz bank:** `{}`\n\n", report.metadata.bank_file));
        }

        match &report.body {
            ReportBody::Analysis(matches) => {
                output.push_str("## Top Career Matches\n\n");
                output.push_str("| # | Career | Score | Match |\n|---|--------|-------|-------|\n");
                for (i, m) in matches.iter().enumerate() {
                    output.push_str(&format!(
                        "| {} | {} | {:.1}% | {} |\n",
                        i + 1,
                        m.career.name,
                        m.score,
                        Self::markdown_score_badge(m.score)
                    ));
                }
                output.push('\n');
                for m in matches {
                    output.push_str(&format!("- **{}:** {}\n", m.career.name, m.reasoning));
                }
            }
            ReportBody::Quiz(quiz) => {
                output.push_str("## Recommended Fields\n\n");
                output.push_str(&Self::ranked_table(
                    quiz.outcome.top.iter().map(|c| (c.name.clone(), c.score)),
                ));
                let skipped = quiz.outcome.skipped().count();
                if skipped > 0 {
                    output.push_str(&format!("\n_{} answers could not be scored._\n", skipped));
                }
            }
            ReportBody::Summary(summary) => {
                output.push_str(&format!("## Across {} attempts\n\n", summary.attempts));
                output.push_str(&Self::ranked_table(
                    summary.top_careers.iter().map(|e| (e.name.clone(), e.total_score)),
                ));
            }
            ReportBody::Comparison(comparison) => {
                for attempt in [&comparison.first, &comparison.second] {
                    output.push_str(&format!(
                        "## Attempt #{} ({})\n\n",
                        attempt.id,
                        attempt.timestamp.format("%Y-%m-%d")
                    ));
                    output.push_str(&Self::ranked_table(
                        attempt.recommendations.iter().map(|c| (c.name.clone(), c.score)),
                    ));
                    output.push('\n');
                }
            }
            ReportBody::Tally(tally) => {
                output.push_str(&format!(
                    "## Category Preferences\n\n{} questions answered.\n\n",
                    tally.total_questions_answered
                ));
                output.push_str("| Category | Score | Answers |\n|----------|-------|---------|\n");
                for entry in &tally.ranking {
                    output.push_str(&format!("| {} | {:+.1} | {} |\n", entry.category, entry.score, entry.count));
                }
            }
            ReportBody::Dislikes(careers) => {
                output.push_str("## Careers Ruled Out\n\n");
                for career in careers {
                    output.push_str(&format!("- {}\n", career.name));
                }
            }
            ReportBody::Stats(stats) => {
                output.push_str("## Quiz Statistics\n\n");
                output.push_str(&format!(
                    "- Total questions: {}\n- Interest: {}\n- Degree: {}\n- Career: {}\n- Field-based: {}\n",
                    stats.total_questions, stats.interest, stats.degree, stats.career, stats.field_based
                ));
            }
            ReportBody::Submission(submission) => {
                output.push_str(&format!("## Answer Submission\n\n{} answers saved.\n", submission.total_submitted));
                for error in &submission.errors {
                    output.push_str(&format!("- {}\n", error));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
        }
    }

    pub fn from_config(output: &OutputConfig) -> Self {
        Self::with_options(output.color_output, output.detailed, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

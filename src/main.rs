//! Career advisor: quiz-driven career recommendations

use career_advisor::cli::{self, Cli, Commands, ConfigAction, ReportArgs};
use career_advisor::config::Config;
use career_advisor::error::{CareerAdvisorError, Result};
use career_advisor::input::BankManager;
use career_advisor::output::{save_report_to_file, QuizReport, Report, ReportBody, ReportGenerator};
use career_advisor::scoring::{
    compare_attempts, disliked_careers, quiz_stats, score_answers, submit_quiz, summarize_attempts,
    tally_categories, AttemptContext, CareerAnalyzer,
};
use career_advisor::store::InMemoryStore;
use clap::Parser;
use log::{error, info};
use std::path::Path;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            eprintln!("Failed to load configuration.");
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        eprintln!("The command could not be completed.");
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    let mut banks = BankManager::new();

    match command {
        Commands::Score {
            bank,
            answers,
            top,
            user,
            level,
            stream,
            record,
            report,
        } => {
            let store = open_store(&mut banks, &bank).await?;
            cli::validate_file_extension(&answers, &["json", "toml"])
                .map_err(|e| CareerAdvisorError::InvalidInput(format!("Answer sheet: {}", e)))?;
            let sheet = banks.load_answer_sheet(&answers).await?;
            let top = top.unwrap_or(config.ranking.quiz_top_n);

            let (outcome, attempt_id) = if record {
                let context = AttemptContext {
                    user: user.clone(),
                    academic_level: level,
                    stream,
                };
                let (outcome, attempt) = submit_quiz(&store, context, &sheet, top)?;
                banks.save_bank(&bank, &store.snapshot()?).await?;
                (outcome, Some(attempt.id))
            } else {
                (score_answers(&store, &sheet, top)?, None)
            };

            let body = ReportBody::Quiz(QuizReport { outcome, attempt_id });
            emit(Report::new("Quiz Results", user.as_deref(), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Submit {
            bank,
            user,
            answers,
            reset,
            report,
        } => {
            let store = open_store(&mut banks, &bank).await?;
            let entries = banks.load_submissions(&answers).await?;
            if reset {
                let removed = store.reset_answers(&user)?;
                info!("Cleared {} earlier answers of '{}'", removed, user);
            }
            let submission = store.submit_answers(&user, &entries)?;
            banks.save_bank(&bank, &store.snapshot()?).await?;

            let body = ReportBody::Submission(submission);
            emit(Report::new("Answers Saved", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Analyze {
            bank,
            user,
            persist,
            report,
        } => {
            let store = open_store(&mut banks, &bank).await?;
            let analyzer = CareerAnalyzer::new(&config);
            let matches = analyzer.analyze(&store, &user)?;
            if persist {
                banks.save_bank(&bank, &store.snapshot()?).await?;
            }

            let body = ReportBody::Analysis(matches);
            emit(Report::new("Career Recommendations", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Summary { bank, user, report } => {
            let store = open_store(&mut banks, &bank).await?;
            let summary = summarize_attempts(&store, &user, config.ranking.summary_top_n)?;

            let body = ReportBody::Summary(summary);
            emit(Report::new("Quiz History Summary", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Compare {
            bank,
            user,
            first,
            second,
            report,
        } => {
            let store = open_store(&mut banks, &bank).await?;
            let comparison = compare_attempts(&store, &user, first, second)?;

            let body = ReportBody::Comparison(comparison);
            emit(Report::new("Attempt Comparison", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Tally { bank, user, report } => {
            let store = open_store(&mut banks, &bank).await?;
            let tally = tally_categories(&store, &config.choice_weights, &user)?;

            let body = ReportBody::Tally(tally);
            emit(Report::new("Category Tally", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Dislikes { bank, user, report } => {
            let store = open_store(&mut banks, &bank).await?;
            let careers = disliked_careers(&store, &user)?;

            let body = ReportBody::Dislikes(careers);
            emit(Report::new("Disliked Careers", Some(&user), bank_name(&bank), body), &report, &config)?;
        }

        Commands::Stats { bank, report } => {
            let store = open_store(&mut banks, &bank).await?;
            let stats = quiz_stats(&store)?;

            let body = ReportBody::Stats(stats);
            emit(Report::new("Quiz Statistics", None, bank_name(&bank), body), &report, &config)?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                let text = toml::to_string_pretty(&config)
                    .map_err(|e| CareerAdvisorError::Configuration(format!("Failed to serialize config: {}", e)))?;
                println!("⚙️  Current Configuration\n");
                println!("{}", text);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default().save()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                println!("{}", Config::config_path().display());
            }
        },
    }

    Ok(())
}

async fn open_store(banks: &mut BankManager, path: &Path) -> Result<InMemoryStore> {
    cli::validate_file_extension(path, &["json", "toml"])
        .map_err(|e| CareerAdvisorError::InvalidInput(format!("Quiz bank: {}", e)))?;
    let bank = banks.load_bank(path).await?;
    InMemoryStore::from_bank(bank)
}

fn bank_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Render `report` in the requested format, print it and optionally save it
fn emit(report: Report, args: &ReportArgs, config: &Config) -> Result<()> {
    let format = match &args.output {
        Some(format) => cli::parse_output_format(format).map_err(CareerAdvisorError::InvalidInput)?,
        None => config.output.format,
    };

    let mut output_config = config.output.clone();
    output_config.detailed |= args.detailed;
    // Saved files never carry color codes
    if args.save.is_some() {
        output_config.color_output = false;
    }

    let rendered = ReportGenerator::from_config(&output_config).generate_report(&report, &format)?;
    println!("{}", rendered);

    if let Some(path) = &args.save {
        save_report_to_file(&rendered, path)?;
        info!("Report saved to: {}", path.display());
    }
    Ok(())
}

//! Integration tests for the career advisor

use career_advisor::config::Config;
use career_advisor::error::CareerAdvisorError;
use career_advisor::input::BankManager;
use career_advisor::scoring::{
    disliked_careers, quiz_stats, score_answers, submit_quiz, summarize_attempts, tally_categories,
    AttemptContext, CareerAnalyzer, SkipReason,
};
use career_advisor::model::QuestionCategory;
use career_advisor::store::{AttemptStore, InMemoryStore};
use std::path::Path;

const JSON_BANK: &str = "tests/fixtures/quiz_bank.json";

async fn open(path: &str) -> InMemoryStore {
    let mut manager = BankManager::new();
    let bank = manager.load_bank(Path::new(path)).await.unwrap();
    InMemoryStore::from_bank(bank).unwrap()
}

#[tokio::test]
async fn test_load_json_bank() {
    let store = open(JSON_BANK).await;
    let stats = quiz_stats(&store).unwrap();

    assert_eq!(stats.total_questions, 8);
    assert_eq!((stats.interest, stats.degree, stats.career, stats.field_based), (2, 2, 2, 2));
}

#[tokio::test]
async fn test_load_toml_bank() {
    let store = open("tests/fixtures/quiz_bank.toml").await;

    let matches = CareerAnalyzer::new(&Config::default()).analyze(&store, "carol").unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].career.slug, "doctor");
    assert!((matches[0].score - 40.0).abs() < 1e-9);
}

#[tokio::test]
async fn test_caching_functionality() {
    let mut manager = BankManager::new();
    let path = Path::new(JSON_BANK);

    let first = manager.load_bank(path).await.unwrap();
    assert_eq!(manager.cache_size(), 1);

    let second = manager.load_bank(path).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(manager.cache_size(), 1);

    manager.clear_cache();
    assert_eq!(manager.cache_size(), 0);
}

#[tokio::test]
async fn test_unsupported_file_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.yaml");
    std::fs::write(&path, "careers: []").unwrap();

    let mut manager = BankManager::new();
    let result = manager.load_bank(&path).await;
    assert!(matches!(result, Err(CareerAdvisorError::UnsupportedFormat(_))));
}

#[tokio::test]
async fn test_nonexistent_file() {
    let mut manager = BankManager::new();
    let result = manager.load_bank(Path::new("tests/fixtures/missing.json")).await;
    assert!(matches!(result, Err(CareerAdvisorError::InvalidInput(_))));
}

#[tokio::test]
async fn test_invalid_bank_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.json");
    std::fs::write(&path, r#"{"careers": [{"slug": "Not A Slug", "name": "Broken"}]}"#).unwrap();

    let mut manager = BankManager::new();
    assert!(matches!(manager.load_bank(&path).await, Err(CareerAdvisorError::Dataset(_))));
}

#[tokio::test]
async fn test_analyze_ranks_and_replaces() {
    let store = open(JSON_BANK).await;
    let matches = CareerAnalyzer::new(&Config::default()).analyze(&store, "alice").unwrap();

    let ranked: Vec<&str> = matches.iter().map(|m| m.career.slug.as_str()).collect();
    assert_eq!(ranked, vec!["software-engineer", "doctor"]);
    // 0.4 * 10 + 0.3 * 7.5 + 0.3 * 6.25
    assert!((matches[0].score - 81.25).abs() < 1e-9);
    assert!((matches[1].score - 10.0).abs() < 1e-9);

    let persisted: Vec<String> = store
        .recommendations_for("alice")
        .unwrap()
        .into_iter()
        .map(|r| r.career)
        .collect();
    assert_eq!(persisted, vec!["software-engineer".to_string(), "doctor".to_string()]);
}

#[tokio::test]
async fn test_tally_and_dislikes() {
    let store = open(JSON_BANK).await;

    let tally = tally_categories(&store, &Config::default().choice_weights, "alice").unwrap();
    assert_eq!(tally.total_questions_answered, 5);
    let order: Vec<(QuestionCategory, f64)> = tally.ranking.iter().map(|e| (e.category, e.score)).collect();
    assert_eq!(
        order,
        vec![
            (QuestionCategory::Interest, 1.0),
            (QuestionCategory::Degree, 0.5),
            (QuestionCategory::Career, -1.0),
        ]
    );

    let disliked: Vec<String> = disliked_careers(&store, "alice")
        .unwrap()
        .into_iter()
        .map(|c| c.slug)
        .collect();
    assert_eq!(disliked, vec!["lawyer".to_string()]);
}

#[tokio::test]
async fn test_score_json_answer_sheet() {
    let store = open(JSON_BANK).await;
    let manager = BankManager::new();
    let sheet = manager
        .load_answer_sheet(Path::new("tests/fixtures/answer_sheet.json"))
        .await
        .unwrap();

    let outcome = score_answers(&store, &sheet, 3).unwrap();

    let top: Vec<(&str, i64)> = outcome.top.iter().map(|r| (r.slug.as_str(), r.score)).collect();
    assert_eq!(top, vec![("ce", 9), ("me", 6), ("cse", 2)]);
    let reasons: Vec<SkipReason> = outcome
        .skipped()
        .filter_map(|o| match o {
            career_advisor::scoring::AnswerOutcome::Skipped { reason, .. } => Some(reason.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        reasons,
        vec![
            SkipReason::UnknownQuestion { question: 99 },
            SkipReason::NotFieldBased { question: 1 },
        ]
    );
}

#[tokio::test]
async fn test_score_toml_answer_sheet() {
    let store = open(JSON_BANK).await;
    let sheet = BankManager::new()
        .load_answer_sheet(Path::new("tests/fixtures/answer_sheet.toml"))
        .await
        .unwrap();

    let outcome = score_answers(&store, &sheet, 3).unwrap();
    let top: Vec<(&str, i64)> = outcome.top.iter().map(|r| (r.slug.as_str(), r.score)).collect();
    assert_eq!(top, vec![("cse", 10), ("ece", 5)]);
}

#[tokio::test]
async fn test_summary_over_history() {
    let store = open(JSON_BANK).await;
    let summary = summarize_attempts(&store, "bob", 3).unwrap();

    assert_eq!(summary.attempts, 2);
    // astronaut makes the cut but is not in the catalogue
    let entries: Vec<(&str, i64)> = summary
        .top_careers
        .iter()
        .map(|e| (e.slug.as_str(), e.total_score))
        .collect();
    assert_eq!(entries, vec![("me", 10), ("cse", 7)]);
    assert_eq!(summary.top_careers[0].name, "Mechanical Engineering");
}

#[tokio::test]
async fn test_submissions_and_attempts_survive_write_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.json");
    std::fs::copy(JSON_BANK, &path).unwrap();

    let mut manager = BankManager::new();
    let store = InMemoryStore::from_bank(manager.load_bank(&path).await.unwrap()).unwrap();

    let entries = manager
        .load_submissions(Path::new("tests/fixtures/submissions.json"))
        .await
        .unwrap();
    let report = store.submit_answers("alice", &entries).unwrap();
    assert_eq!(report.total_submitted, 1);
    assert_eq!(report.errors.len(), 3);

    let sheet = manager
        .load_answer_sheet(Path::new("tests/fixtures/answer_sheet.toml"))
        .await
        .unwrap();
    let context = AttemptContext {
        user: Some("alice".to_string()),
        ..AttemptContext::default()
    };
    let (_, attempt) = submit_quiz(&store, context, &sheet, 3).unwrap();
    assert_eq!(attempt.id, 3);

    manager.save_bank(&path, &store.snapshot().unwrap()).await.unwrap();

    let reloaded = InMemoryStore::from_bank(BankManager::new().load_bank(&path).await.unwrap()).unwrap();
    let answers = career_advisor::store::QuizRepository::answers_for_user(&reloaded, "alice").unwrap();
    assert_eq!(answers.len(), 6);
    assert!(answers.iter().any(|a| a.question_id == 4 && a.choice == "Strongly Like"));

    let attempts = reloaded.attempts_for_user("alice").unwrap();
    assert_eq!(attempts.len(), 1);
    let order: Vec<&str> = attempts[0].results.keys().map(|s| s.as_str()).collect();
    assert_eq!(order, vec!["cse", "ece"]);
}

#[tokio::test]
async fn test_toml_write_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bank.toml");

    let mut manager = BankManager::new();
    let bank = manager
        .load_bank(Path::new("tests/fixtures/quiz_bank.toml"))
        .await
        .unwrap();
    manager.save_bank(&path, &bank).await.unwrap();
    // the written file is cached under its own path
    assert_eq!(manager.cache_size(), 2);
    assert_eq!(manager.load_bank(&path).await.unwrap(), bank);

    let reloaded = BankManager::new().load_bank(&path).await.unwrap();
    assert_eq!(reloaded.careers, bank.careers);
    assert_eq!(reloaded.questions, bank.questions);
}

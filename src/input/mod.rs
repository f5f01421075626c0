//! Input processing module
//! Handles data file detection, parsing and the quiz bank cache

pub mod bank_reader;
pub mod file_detector;
pub mod manager;

pub use manager::BankManager;

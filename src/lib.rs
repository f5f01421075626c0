//! Career advisor library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod output;
pub mod scoring;
pub mod store;

pub use config::Config;
pub use error::{CareerAdvisorError, Result};

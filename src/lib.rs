//! Asin-Harvest: a batch product-page scraper
//!
//! This crate fetches Amazon product detail pages by ASIN through a
//! web-unlocker API, extracts a fixed set of fields from each page, and
//! assembles the results into a CSV report with summary statistics.

pub mod asin;
pub mod config;
pub mod input;
pub mod output;
pub mod scraper;

use thiserror::Error;

/// Main error type for Asin-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Worker task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("No API token provided (flag, config, or BRIGHTDATA_API_TOKEN)")]
    MissingToken,
}

/// Errors raised while reading the tabular input file
///
/// These are fatal: a bad input file aborts the run before any network
/// activity happens.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input file has no column named '{expected}' (case-insensitive)")]
    MissingColumn { expected: String },
}

/// Result type alias for Asin-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for input-file operations
pub type InputResult<T> = std::result::Result<T, InputError>;

// Re-export commonly used types
pub use asin::{filter_asins, Asin};
pub use config::Config;
pub use scraper::{BatchReport, Coordinator, ProductRecord};

//! Configuration module for Asin-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use asin_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Unlocker zone: {}", config.api.zone);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, Config, OutputConfig, ScraperConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};

//! Scraper module for product-page fetching and extraction
//!
//! This module contains the core pipeline, including:
//! - The unlocker API client and fetch-failure classification
//! - Field extraction from page HTML
//! - Batch coordination with a bounded worker pool
//! - Account balance lookup

mod account;
mod coordinator;
mod extractor;
mod fetcher;

pub use account::{fetch_balance, BalanceStatus};
pub use coordinator::{BatchReport, Coordinator, Progress};
pub use extractor::{
    extract_product, not_found_record, ProductRecord, NOT_FOUND, NO_RATING, NO_REVIEWS,
};
pub use fetcher::{FetchFailure, FetchOutcome, UnlockerClient};

use crate::asin::Asin;
use crate::config::Config;
use crate::Result;

/// Runs a complete batch scrape
///
/// Convenience wrapper that builds a [`Coordinator`] and runs the given
/// ASINs through it.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `token` - Resolved unlocker API token
/// * `asins` - Validated identifiers to scrape
///
/// # Returns
///
/// * `Ok(BatchReport)` - One record per ASIN plus run counters
/// * `Err(HarvestError)` - Failed to set up the pipeline
pub async fn run_batch(config: Config, token: String, asins: &[Asin]) -> Result<BatchReport> {
    let coordinator = Coordinator::new(config, token)?;
    coordinator.run(asins).await
}

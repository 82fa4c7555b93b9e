//! Scrape coordinator - batch orchestration logic
//!
//! This module owns the bounded worker pool that drives a batch:
//! - One fetch+extract task per validated ASIN
//! - A semaphore bound on how many tasks run at once
//! - Degradation of per-task failures into "Not found" records
//! - Progress reporting over a watch channel
//! - The shared outbound-request counter
//!
//! A batch always completes with exactly one record per dispatched ASIN,
//! in input order, no matter how many individual fetches fail.

use crate::asin::Asin;
use crate::config::Config;
use crate::scraper::extractor::{extract_product, not_found_record, ProductRecord};
use crate::scraper::fetcher::{FetchOutcome, UnlockerClient};
use crate::HarvestError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{watch, Semaphore};
use tokio::task::JoinSet;

/// Progress of an in-flight batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    /// Tasks finished so far
    pub completed: usize,

    /// Tasks dispatched in total
    pub total: usize,
}

/// Completed batch: one record per dispatched ASIN plus run counters
#[derive(Debug)]
pub struct BatchReport {
    /// Records in input order
    pub records: Vec<ProductRecord>,

    /// Outbound requests issued, including failed attempts
    pub requests_issued: u64,

    /// Wall-clock duration of the batch
    pub elapsed: Duration,

    /// When the batch started
    pub started_at: DateTime<Utc>,
}

impl BatchReport {
    /// Number of records that came back with page content
    pub fn success_count(&self) -> usize {
        self.records.iter().filter(|r| !r.is_not_found()).count()
    }

    /// Number of records degraded by a total fetch failure
    pub fn not_found_count(&self) -> usize {
        self.records.len() - self.success_count()
    }
}

/// Main batch coordinator structure
pub struct Coordinator {
    config: Arc<Config>,
    client: UnlockerClient,
    progress_tx: watch::Sender<Progress>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The scraper configuration
    /// * `token` - Resolved unlocker API token
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Failed to build the HTTP client
    pub fn new(config: Config, token: String) -> Result<Self, HarvestError> {
        let client = UnlockerClient::new(&config.api, token)?;
        let (progress_tx, _) = watch::channel(Progress {
            completed: 0,
            total: 0,
        });

        Ok(Self {
            config: Arc::new(config),
            client,
            progress_tx,
        })
    }

    /// Returns a receiver for `(completed, total)` progress updates
    pub fn progress(&self) -> watch::Receiver<Progress> {
        self.progress_tx.subscribe()
    }

    /// The unlocker client used by this coordinator's workers
    pub fn client(&self) -> &UnlockerClient {
        &self.client
    }

    /// Runs the batch: one fetch+extract task per ASIN
    ///
    /// Tasks are all spawned up front and gate on a semaphore sized to the
    /// configured concurrency bound, so at most that many fetches are in
    /// flight at any instant while the rest queue. Completion order is
    /// arbitrary; every task carries its input index and the final record
    /// list is assembled back into input order.
    ///
    /// A fetch failure, and even a panicked worker, degrades to the
    /// "Not found" record for that ASIN rather than aborting the batch.
    pub async fn run(&self, asins: &[Asin]) -> Result<BatchReport, HarvestError> {
        let total = asins.len();
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            "Starting batch of {} ASINs ({} concurrent)",
            total,
            self.config.scraper.max_concurrent_requests
        );
        self.send_progress(0, total);

        let semaphore = Arc::new(Semaphore::new(
            self.config.scraper.max_concurrent_requests as usize,
        ));
        let mut workers: JoinSet<(usize, ProductRecord)> = JoinSet::new();

        for (index, asin) in asins.iter().enumerate() {
            let asin = asin.clone();
            let client = self.client.clone();
            let semaphore = semaphore.clone();
            let domain = self.config.scraper.product_domain.clone();

            workers.spawn(async move {
                // Holds the permit for the lifetime of the fetch+extract.
                let _permit = semaphore.acquire_owned().await.ok();

                let url = asin.product_url(&domain);
                let record = match client.fetch_page(&url).await {
                    FetchOutcome::Content(html) => extract_product(&html, &asin, &url),
                    FetchOutcome::Failure(failure) => {
                        tracing::warn!("Fetch failed for {}: {}", asin, failure);
                        not_found_record(&asin, &url)
                    }
                };

                (index, record)
            });
        }

        // One slot per input index; tasks fill their own slot as they land.
        let mut slots: Vec<Option<ProductRecord>> = (0..total).map(|_| None).collect();
        let mut completed = 0usize;

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok((index, record)) => {
                    slots[index] = Some(record);
                }
                Err(e) => {
                    tracing::error!("Worker task failed: {}", e);
                }
            }

            completed += 1;
            self.send_progress(completed, total);
            tracing::info!("Scraped {}/{} products", completed, total);
        }

        // A slot left empty means its worker died before returning; the
        // batch still owes a row for that ASIN.
        let records: Vec<ProductRecord> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    let asin = &asins[index];
                    let url = asin.product_url(&self.config.scraper.product_domain);
                    not_found_record(asin, &url)
                })
            })
            .collect();

        let report = BatchReport {
            records,
            requests_issued: self.client.request_count(),
            elapsed: start.elapsed(),
            started_at,
        };

        tracing::info!(
            "Batch complete: {} records, {} requests, {:.2}s",
            report.records.len(),
            report.requests_issued,
            report.elapsed.as_secs_f64()
        );

        Ok(report)
    }

    fn send_progress(&self, completed: usize, total: usize) {
        let _ = self.progress_tx.send(Progress { completed, total });
    }
}

//! Unlocker API client
//!
//! This module handles all outbound HTTP for the scraper:
//! - Building the HTTP client with timeouts and compression
//! - One POST to the unlocker `/request` endpoint per product page
//! - Error classification into typed fetch failures
//! - Counting attempts on the shared request counter
//!
//! Fetch failures are values, not errors: a failed page never aborts the
//! batch.

use crate::config::ApiConfig;
use reqwest::{Client, StatusCode};
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Result of one fetch attempt
#[derive(Debug)]
pub enum FetchOutcome {
    /// The unlocker returned the raw page body
    Content(String),

    /// The attempt failed; the batch continues
    Failure(FetchFailure),
}

/// Classified reason a fetch attempt failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// The unlocker answered with a non-200 status
    Status(u16),

    /// The request timed out
    Timeout,

    /// Transport-level failure (DNS, connection refused, TLS, ...)
    Network(String),
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status(code) => write!(f, "HTTP {}", code),
            Self::Timeout => write!(f, "request timeout"),
            Self::Network(msg) => write!(f, "network error: {}", msg),
        }
    }
}

/// Client for the web-unlocker API
///
/// Wraps a shared `reqwest::Client` plus the endpoint, zone, and bearer
/// token used for every request. Cloning is cheap and clones share the
/// attempt counter, so one `UnlockerClient` can be handed to every worker
/// task.
#[derive(Debug, Clone)]
pub struct UnlockerClient {
    http: Client,
    endpoint: String,
    zone: String,
    token: String,
    requests: Arc<AtomicU64>,
}

impl UnlockerClient {
    /// Creates a new unlocker client from API configuration
    ///
    /// # Arguments
    ///
    /// * `config` - The unlocker API configuration
    /// * `token` - Resolved bearer token
    ///
    /// # Returns
    ///
    /// * `Ok(UnlockerClient)` - Successfully built client
    /// * `Err(reqwest::Error)` - Failed to build the HTTP client
    pub fn new(config: &ApiConfig, token: String) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            zone: config.zone.clone(),
            token,
            requests: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Number of fetch attempts issued so far, successful or not
    pub fn request_count(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    /// Base URL of the unlocker API
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub(super) fn http(&self) -> &Client {
        &self.http
    }

    pub(super) fn token(&self) -> &str {
        &self.token
    }

    /// Fetches one product page through the unlocker API
    ///
    /// Issues a single `POST /request` carrying the target URL and zone.
    /// The attempt counter is incremented exactly once per call, before any
    /// early return, so it counts attempts rather than successes. There is
    /// no internal retry.
    ///
    /// # Arguments
    ///
    /// * `target_url` - The product detail-page URL to unlock
    pub async fn fetch_page(&self, target_url: &str) -> FetchOutcome {
        self.requests.fetch_add(1, Ordering::Relaxed);

        let body = json!({
            "zone": self.zone,
            "url": target_url,
            "format": "raw",
        });

        let result = self
            .http
            .post(format!("{}/request", self.endpoint))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status();
                if status != StatusCode::OK {
                    tracing::debug!("Unlocker returned {} for {}", status, target_url);
                    return FetchOutcome::Failure(FetchFailure::Status(status.as_u16()));
                }

                match response.text().await {
                    Ok(content) => FetchOutcome::Content(content),
                    Err(e) => FetchOutcome::Failure(classify_error(&e)),
                }
            }
            Err(e) => FetchOutcome::Failure(classify_error(&e)),
        }
    }
}

/// Maps a reqwest error onto a fetch failure classification
fn classify_error(error: &reqwest::Error) -> FetchFailure {
    if error.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Network(error.to_string())
    }
}

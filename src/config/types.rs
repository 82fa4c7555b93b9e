use serde::Deserialize;

/// Main configuration structure for Asin-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    pub output: OutputConfig,
}

/// Web-unlocker API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the unlocker API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Unlocker zone selector sent with every page request
    pub zone: String,

    /// Bearer token; may be omitted and supplied via flag or environment
    #[serde(default)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout-secs", default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScraperConfig {
    /// Maximum number of concurrent fetch+extract tasks
    #[serde(rename = "max-concurrent-requests", default = "default_concurrency")]
    pub max_concurrent_requests: u32,

    /// Base URL the product detail pages live under
    #[serde(rename = "product-domain", default = "default_product_domain")]
    pub product_domain: String,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the CSV report is written to
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}

fn default_endpoint() -> String {
    "https://api.brightdata.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_concurrency() -> u32 {
    10
}

fn default_product_domain() -> String {
    "https://www.amazon.com".to_string()
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: default_concurrency(),
            product_domain: default_product_domain(),
        }
    }
}

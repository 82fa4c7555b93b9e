use crate::config::types::{ApiConfig, Config, OutputConfig, ScraperConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_scraper_config(&config.scraper)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates unlocker API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api endpoint: {}", e)))?;

    if endpoint.scheme() != "https" && endpoint.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "api endpoint must be http(s), got '{}'",
            config.endpoint
        )));
    }

    if config.zone.is_empty() {
        return Err(ConfigError::Validation("api zone cannot be empty".to_string()));
    }

    if !config
        .zone
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "api zone must contain only alphanumeric characters, underscores and hyphens, got '{}'",
            config.zone
        )));
    }

    if config.request_timeout_secs < 1 || config.request_timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be between 1 and 300, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates scraper configuration
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_requests < 1 || config.max_concurrent_requests > 100 {
        return Err(ConfigError::Validation(format!(
            "max-concurrent-requests must be between 1 and 100, got {}",
            config.max_concurrent_requests
        )));
    }

    let domain = Url::parse(&config.product_domain)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid product-domain: {}", e)))?;

    if domain.scheme() != "https" && domain.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "product-domain must be http(s), got '{}'",
            config.product_domain
        )));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation("csv-path cannot be empty".to_string()));
    }

    Ok(())
}

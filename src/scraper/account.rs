//! Account balance lookup against the unlocker API
//!
//! The balance is display-only information. Any failure, from transport
//! errors to a missing field in the response, maps to an explicit
//! `Unavailable` variant rather than an error.

use crate::scraper::fetcher::UnlockerClient;

/// Outcome of a credits lookup
#[derive(Debug, Clone, PartialEq)]
pub enum BalanceStatus {
    /// Remaining credits reported by the API
    Credits(f64),

    /// The balance could not be determined
    Unavailable,
}

impl std::fmt::Display for BalanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Credits(credits) => write!(f, "{}", credits),
            Self::Unavailable => write!(f, "unknown"),
        }
    }
}

/// Fetches the remaining account credits
///
/// Issues `GET /account/info` and reads the `balance.credits` field of the
/// JSON response. This call does not touch the attempt counter; it is not a
/// page fetch.
pub async fn fetch_balance(client: &UnlockerClient) -> BalanceStatus {
    let result = client
        .http()
        .get(format!("{}/account/info", client.endpoint()))
        .bearer_auth(client.token())
        .send()
        .await;

    let response = match result {
        Ok(response) if response.status().is_success() => response,
        Ok(response) => {
            tracing::debug!("Balance lookup returned {}", response.status());
            return BalanceStatus::Unavailable;
        }
        Err(e) => {
            tracing::debug!("Balance lookup failed: {}", e);
            return BalanceStatus::Unavailable;
        }
    };

    match response.json::<serde_json::Value>().await {
        Ok(body) => extract_credits(&body)
            .map(BalanceStatus::Credits)
            .unwrap_or(BalanceStatus::Unavailable),
        Err(e) => {
            tracing::debug!("Balance response was not JSON: {}", e);
            BalanceStatus::Unavailable
        }
    }
}

/// Pulls `balance.credits` out of an account-info response body
fn extract_credits(body: &serde_json::Value) -> Option<f64> {
    body.get("balance")?.get("credits")?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_credits() {
        let body = json!({"balance": {"credits": 123.5}});
        assert_eq!(extract_credits(&body), Some(123.5));
    }

    #[test]
    fn test_extract_credits_integer() {
        let body = json!({"balance": {"credits": 42}});
        assert_eq!(extract_credits(&body), Some(42.0));
    }

    #[test]
    fn test_extract_credits_missing_balance() {
        let body = json!({"account": "x"});
        assert_eq!(extract_credits(&body), None);
    }

    #[test]
    fn test_extract_credits_wrong_type() {
        let body = json!({"balance": {"credits": "plenty"}});
        assert_eq!(extract_credits(&body), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(BalanceStatus::Credits(12.5).to_string(), "12.5");
        assert_eq!(BalanceStatus::Unavailable.to_string(), "unknown");
    }
}

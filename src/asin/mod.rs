//! ASIN handling module for Asin-Harvest
//!
//! This module provides the validated `Asin` identifier type, canonical
//! product-URL construction, and batch validation of raw input tokens.

mod validate;

// Re-export main functions
pub use validate::filter_asins;

/// A validated Amazon Standard Identification Number
///
/// An `Asin` is always exactly 10 uppercase alphanumeric characters.
/// Construction goes through [`Asin::parse`], which normalizes (trim +
/// uppercase) and rejects anything that does not match the pattern, so a
/// held `Asin` never needs re-checking.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Asin(String);

/// Length every ASIN must have
pub const ASIN_LEN: usize = 10;

impl Asin {
    /// Parses a raw token into a validated ASIN
    ///
    /// The token is trimmed and uppercased before checking. Returns `None`
    /// for anything that is not exactly 10 uppercase alphanumeric
    /// characters after normalization.
    ///
    /// # Examples
    ///
    /// ```
    /// use asin_harvest::asin::Asin;
    ///
    /// assert!(Asin::parse(" b07x1234yz ").is_some());
    /// assert!(Asin::parse("B07X1234").is_none()); // too short
    /// assert!(Asin::parse("B07X-234YZ").is_none()); // bad charset
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();

        if normalized.len() != ASIN_LEN {
            return None;
        }

        if !normalized
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
        {
            return None;
        }

        Some(Self(normalized))
    }

    /// Returns the ASIN as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds the canonical product detail-page URL for this ASIN
    ///
    /// # Arguments
    ///
    /// * `domain` - Base URL of the product site, with or without a
    ///   trailing slash
    pub fn product_url(&self, domain: &str) -> String {
        format!("{}/dp/{}", domain.trim_end_matches('/'), self.0)
    }
}

impl std::fmt::Display for Asin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

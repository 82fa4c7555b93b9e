//! Batch validation of raw input tokens into ASINs
//!
//! Raw cells are deduplicated by their original spelling first, then
//! normalized and checked. Malformed tokens are expected noise in real
//! input files and are dropped without error.

use crate::asin::Asin;
use std::collections::HashSet;

/// Filters a sequence of raw input tokens down to validated ASINs
///
/// The pipeline is deduplicate-then-filter:
/// 1. drop duplicates by raw value, keeping the first occurrence,
/// 2. normalize each survivor (trim + uppercase),
/// 3. keep only tokens that form a well-formed ASIN.
///
/// Output preserves first-seen order of valid entries. Because
/// deduplication happens before normalization, two raw spellings of the
/// same ASIN (e.g. `"b07x1234yz"` and `"B07X1234YZ"`) both survive.
pub fn filter_asins(raw: &[String]) -> Vec<Asin> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut valid = Vec::new();

    for token in raw {
        if !seen.insert(token.as_str()) {
            continue;
        }

        match Asin::parse(token) {
            Some(asin) => valid.push(asin),
            None => {
                tracing::debug!("Dropping malformed ASIN token: '{}'", token.trim());
            }
        }
    }

    valid
}

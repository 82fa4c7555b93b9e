//! Run summary statistics
//!
//! This module turns a completed batch into the summary shown to the user:
//! record count, request count, and elapsed time.

use crate::scraper::BatchReport;
use chrono::{DateTime, Utc};

/// Summary of one scraping run
#[derive(Debug, Clone)]
pub struct BatchSummary {
    /// Rows in the report, one per dispatched ASIN
    pub record_count: usize,

    /// Records that came back with page content
    pub success_count: usize,

    /// Records degraded by a total fetch failure
    pub not_found_count: usize,

    /// Outbound requests issued, including failed attempts
    pub request_count: u64,

    /// Wall-clock duration in seconds
    pub elapsed_secs: f64,

    /// When the run started
    pub started_at: DateTime<Utc>,
}

impl BatchSummary {
    /// Elapsed time in minutes
    pub fn elapsed_mins(&self) -> f64 {
        self.elapsed_secs / 60.0
    }
}

/// Computes the summary for a completed batch
pub fn summarize(report: &BatchReport) -> BatchSummary {
    BatchSummary {
        record_count: report.records.len(),
        success_count: report.success_count(),
        not_found_count: report.not_found_count(),
        request_count: report.requests_issued,
        elapsed_secs: report.elapsed.as_secs_f64(),
        started_at: report.started_at,
    }
}

/// Prints the run summary to stdout in a formatted manner
///
/// # Arguments
///
/// * `summary` - The summary to display
pub fn print_summary(summary: &BatchSummary) {
    println!("=== Scrape Summary ===\n");

    println!("Started: {}", summary.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Records: {}", summary.record_count);
    println!("  Scraped: {}", summary.success_count);
    println!("  Not found: {}", summary.not_found_count);
    println!("Requests issued: {}", summary.request_count);
    println!();

    println!(
        "Done! Scraped {} products using {} requests in {:.2} minutes ({:.2} seconds).",
        summary.record_count,
        summary.request_count,
        summary.elapsed_mins(),
        summary.elapsed_secs
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asin::Asin;
    use crate::scraper::{not_found_record, ProductRecord};
    use std::time::Duration;

    fn record(asin: &str) -> ProductRecord {
        let asin = Asin::parse(asin).unwrap();
        ProductRecord {
            name: "Widget".to_string(),
            asin: asin.as_str().to_string(),
            rating: "4.0 out of 5".to_string(),
            price: "$10.00".to_string(),
            product_url: asin.product_url("https://www.amazon.com"),
            image_count: 1,
            review_count: "10".to_string(),
            breadcrumbs: String::new(),
            best_seller_rank: String::new(),
            make_sure_fits: "No".to_string(),
        }
    }

    #[test]
    fn test_summarize_counts() {
        let failed = Asin::parse("B000000002").unwrap();
        let report = BatchReport {
            records: vec![
                record("B000000001"),
                not_found_record(&failed, "https://www.amazon.com/dp/B000000002"),
            ],
            requests_issued: 2,
            elapsed: Duration::from_secs(90),
            started_at: Utc::now(),
        };

        let summary = summarize(&report);

        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.not_found_count, 1);
        assert_eq!(summary.request_count, 2);
        assert_eq!(summary.elapsed_secs, 90.0);
    }

    #[test]
    fn test_elapsed_minutes() {
        let report = BatchReport {
            records: vec![],
            requests_issued: 0,
            elapsed: Duration::from_secs(90),
            started_at: Utc::now(),
        };

        let summary = summarize(&report);
        assert!((summary.elapsed_mins() - 1.5).abs() < f64::EPSILON);
    }
}

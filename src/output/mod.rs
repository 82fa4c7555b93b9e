//! Output module for the CSV report and run summary
//!
//! This module handles:
//! - Writing the fixed ten-column CSV artifact
//! - Computing and printing run summary statistics

mod csv_output;
pub mod stats;

pub use csv_output::{write_csv_report, CSV_HEADER};
pub use stats::{print_summary, summarize, BatchSummary};

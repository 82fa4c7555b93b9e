//! Input ingestion module for Asin-Harvest
//!
//! This module reads the tabular input file and pulls out the raw ASIN
//! column. Schema problems (missing column, unreadable file) are fatal and
//! surface before any network activity.

mod reader;

pub use reader::{read_asin_column, ASIN_COLUMN};

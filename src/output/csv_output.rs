//! CSV report writer
//!
//! One row per dispatched ASIN, ten fixed columns, UTF-8. Records arrive
//! from the coordinator already in input order; this writer is pass-through
//! aggregation with no further validation.

use crate::scraper::ProductRecord;
use crate::Result;
use std::path::Path;

/// Column header of the report, in emission order
pub const CSV_HEADER: [&str; 10] = [
    "Name",
    "ASIN",
    "Rating",
    "Price",
    "ProductURL",
    "ImageCount",
    "ReviewCount",
    "Breadcrumbs",
    "BestSellerRank",
    "MakeSureFits",
];

/// Writes the batch records to a CSV file at `path`
///
/// # Arguments
///
/// * `records` - Completed records in emission order
/// * `path` - Destination file; truncated if it exists
pub fn write_csv_report(records: &[ProductRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    writer.write_record(CSV_HEADER)?;

    for record in records {
        let image_count = record.image_count.to_string();
        writer.write_record([
            record.name.as_str(),
            record.asin.as_str(),
            record.rating.as_str(),
            record.price.as_str(),
            record.product_url.as_str(),
            image_count.as_str(),
            record.review_count.as_str(),
            record.breadcrumbs.as_str(),
            record.best_seller_rank.as_str(),
            record.make_sure_fits.as_str(),
        ])?;
    }

    writer.flush()?;

    tracing::info!("Wrote {} rows to {}", records.len(), path.display());

    Ok(())
}

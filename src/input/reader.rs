use crate::{InputError, InputResult};
use std::path::Path;

/// Name of the required identifier column, matched case-insensitively
pub const ASIN_COLUMN: &str = "asin";

/// Reads the raw ASIN column from a CSV input file
///
/// Locates the first header whose trimmed name equals `asin`
/// case-insensitively; any other columns are ignored. Empty cells are
/// dropped. The returned values are raw and unvalidated; see
/// [`crate::asin::filter_asins`] for the validation pass.
///
/// # Arguments
///
/// * `path` - Path to the CSV file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - Raw non-empty cell values in row order
/// * `Err(InputError)` - Unreadable file, malformed CSV, or missing column
pub fn read_asin_column(path: &Path) -> InputResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let column_index = headers
        .iter()
        .position(|name| name.eq_ignore_ascii_case(ASIN_COLUMN))
        .ok_or_else(|| InputError::MissingColumn {
            expected: ASIN_COLUMN.to_string(),
        })?;

    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(cell) = record.get(column_index) {
            if !cell.trim().is_empty() {
                cells.push(cell.to_string());
            }
        }
    }

    tracing::debug!(
        "Read {} non-empty cells from column '{}' of {}",
        cells.len(),
        &headers[column_index],
        path.display()
    );

    Ok(cells)
}

//! CSV claim ingestion
//!
//! Reads a header row plus data rows into a [`ClaimBatch`]. Cells are
//! trimmed; blank cells become missing values. Header order is preserved as
//! the batch's column order.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use domain_appeals::{AppealError, ClaimBatch, RawRow};
use tracing::debug;

/// Parses CSV text from any reader
///
/// # Errors
///
/// Returns [`AppealError::MalformedInput`] if the CSV is unreadable, has no
/// header, repeats a header, has ragged rows, or a row fails record parsing.
pub fn read_claim_batch<R: Read>(reader: R) -> Result<ClaimBatch, AppealError> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let columns: Vec<String> = csv
        .headers()
        .map_err(|e| AppealError::malformed(format!("unreadable CSV header: {}", e)))?
        .iter()
        .map(str::to_string)
        .collect();
    if columns.iter().all(|c| c.is_empty()) {
        return Err(AppealError::malformed("CSV input has no header row"));
    }

    let mut seen = HashSet::with_capacity(columns.len());
    for column in &columns {
        if !seen.insert(column.as_str()) {
            return Err(AppealError::malformed(format!(
                "duplicate CSV column '{}'",
                column
            )));
        }
    }

    let mut rows = Vec::new();
    for (i, result) in csv.records().enumerate() {
        let record =
            result.map_err(|e| AppealError::malformed(format!("unreadable CSV row {}: {}", i + 1, e)))?;
        let row: RawRow = columns
            .iter()
            .zip(record.iter())
            .filter(|(_, value)| !value.is_empty())
            .map(|(name, value)| (name.clone(), value.to_string()))
            .collect();
        rows.push(row);
    }

    debug!(columns = columns.len(), rows = rows.len(), "Parsed claim CSV");
    ClaimBatch::from_rows(columns, rows)
}

/// Reads a CSV file from disk
///
/// A missing or unreadable file is an internal failure, not a caller error:
/// this path is only used for the configured default dataset.
pub fn read_claim_batch_from_path(path: impl AsRef<Path>) -> Result<ClaimBatch, AppealError> {
    let path = path.as_ref();
    let file = File::open(path)
        .map_err(|e| AppealError::internal(format!("cannot open dataset {}: {}", path.display(), e)))?;
    read_claim_batch(file)
}

//! Dataset access for the apply command.

use std::path::Path;

use anyhow::{Context, Result};

/// Column names of a CSV dataset, read from its header row.
pub fn csv_column_names(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("failed to read header row of {}", path.display()))?;
    Ok(headers.iter().map(str::to_string).collect())
}

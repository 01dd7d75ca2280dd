//! CSV loading and reshaping for the two source datasets.
pub mod uk;
pub mod us;

use std::path::PathBuf;

pub use uk::{RawTable, UkDataset, UsageBucket};
pub use us::{UsDataset, UsGroup};

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing column `{0}`")]
    MissingColumn(String),
    #[error("row {row}: value `{value}` in column `{column}` is not a number")]
    NotANumber {
        row: usize,
        column: String,
        value: String,
    },
    #[error("duplicate entry for `{0}`")]
    Duplicate(String),
}

/// Parses a numeric cell. Empty cells (and pandas-style `NaN`) are missing values.
pub(crate) fn parse_cell(raw: &str, row: usize, column: &str) -> Result<Option<f64>, DataError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|_| DataError::NotANumber {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cell_handles_blank_and_nan() {
        assert_eq!(parse_cell("", 1, "All").unwrap(), None);
        assert_eq!(parse_cell(" NaN ", 1, "All").unwrap(), None);
        assert_eq!(parse_cell("12.5", 1, "All").unwrap(), Some(12.5));
        assert!(matches!(
            parse_cell("abc", 3, "Girls"),
            Err(DataError::NotANumber { row: 3, .. })
        ));
    }
}

//! Tabular data ingestion.
//!
//! Loads CSV files and the first sheet of Excel workbooks into Polars
//! DataFrames. Unreadable inputs surface as [`IngestError`]; callers treat
//! them as fatal for that file only.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use tidy_ingest::read_table;
//!
//! let df = read_table(Path::new("data/customers.csv"))?;
//! ```

mod csv;
mod error;
mod excel;

use std::path::Path;

use polars::prelude::DataFrame;
use tidy_common::TableFormat;

// === Error Types ===
pub use error::{IngestError, Result};

// === Readers ===
pub use csv::{
    MAX_FILE_SIZE, NA_TOKENS, check_file_size, check_file_size_with_limit, read_csv_table,
};
pub use excel::read_excel_table;

/// Detects the format of `path` from its extension.
pub fn detect_format(path: &Path) -> Result<TableFormat> {
    TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
        extension: path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string(),
    })
}

/// Reads a CSV or Excel file, dispatching on the extension.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    match detect_format(path)? {
        TableFormat::Csv => read_csv_table(path),
        TableFormat::Excel => read_excel_table(path),
    }
}

//! Error types for writing cleaned files.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    /// Could not create the output directory or file.
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Polars failed to serialize the frame as CSV.
    #[error("failed to write CSV {path}: {message}")]
    CsvWrite { path: PathBuf, message: String },

    /// Workbook serialization failed.
    #[error("failed to write workbook {path}: {source}")]
    Workbook {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Frame does not fit on one worksheet.
    #[error("{rows} rows x {columns} columns exceeds the worksheet limit")]
    SheetLimit { rows: usize, columns: usize },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;

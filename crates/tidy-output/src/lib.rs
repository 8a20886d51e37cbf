//! Output generation for cleaned datasets.
//!
//! Cleaned frames are written back in the format they were read from:
//! CSV through the Polars writer, Excel through `rust_xlsxwriter`. Both keep
//! column order and a header row and never add an index column.

mod csv;
mod error;
mod paths;
mod xlsx;

use std::path::Path;

use polars::prelude::DataFrame;
use tidy_common::TableFormat;

pub use csv::write_csv;
pub use error::{OutputError, Result};
pub use paths::{CLEANED_PREFIX, cleaned_output_path};
pub use xlsx::{MAX_SHEET_COLUMNS, MAX_SHEET_ROWS, write_excel};

/// Writes `df` to `path` in `format`, creating the parent directory.
pub fn write_table(df: &DataFrame, path: &Path, format: TableFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::Create {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    match format {
        TableFormat::Csv => write_csv(df, path)?,
        TableFormat::Excel => write_excel(df, path)?,
    }
    tracing::debug!(
        path = %path.display(),
        format = %format,
        rows = df.height(),
        columns = df.width(),
        "wrote cleaned file"
    );
    Ok(())
}

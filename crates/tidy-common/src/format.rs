//! Tabular file formats understood by the ingest and output crates.

use std::fmt;
use std::path::Path;

/// A supported tabular file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    /// Comma-delimited text with a header row.
    Csv,
    /// Spreadsheet workbook; only the first sheet is used.
    Excel,
}

impl TableFormat {
    /// Detects the format from a file extension (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::path::Path;
    /// use tidy_common::TableFormat;
    ///
    /// assert_eq!(TableFormat::from_path(Path::new("a.CSV")), Some(TableFormat::Csv));
    /// assert_eq!(TableFormat::from_path(Path::new("b.xlsx")), Some(TableFormat::Excel));
    /// assert_eq!(TableFormat::from_path(Path::new("c.txt")), None);
    /// ```
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

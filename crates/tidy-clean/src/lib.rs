//! Data-quality scoring and the cleaning pipeline.
//!
//! Two stateless pieces operate on an in-memory Polars `DataFrame`:
//!
//! - **quality**: a 0-100 heuristic from missing cells, duplicate rows and
//!   whitespace-padded text.
//! - **pipeline**: the fixed-order cleaning steps driven by
//!   [`CleaningOptions`], producing a cleaned copy plus a [`CleaningReport`].
//!
//! # Example
//!
//! ```ignore
//! use tidy_clean::{CleaningOptions, FillMethod, clean_dataset};
//!
//! let options = CleaningOptions::new()
//!     .with_strip_spaces(true)
//!     .with_fill_method(FillMethod::Mean)
//!     .with_remove_duplicates(true);
//! let outcome = clean_dataset(&df, &options)?;
//! println!("{} -> {}", outcome.report.before.score, outcome.report.after.score);
//! ```

mod error;
mod options;
mod pipeline;
mod quality;
mod report;

pub use error::{CleanError, Result};
pub use options::{CleaningOptions, FillMethod};
pub use pipeline::{
    CleaningOutcome, clean_dataset, coerce_numeric_columns, drop_duplicate_rows, drop_named_columns,
    drop_null_rows, fill_missing, lowercase_column_names, strip_text_whitespace,
};
pub use quality::{
    DUPLICATE_WEIGHT, FORMAT_WEIGHT, MISSING_WEIGHT, QualitySnapshot, duplicate_row_count,
    missing_cell_count, quality_score, score_from_counts, whitespace_issue_count,
};
pub use report::CleaningReport;

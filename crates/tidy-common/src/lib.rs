//! Shared utilities for tidy-sheets crates.
//!
//! Small helpers for reading Polars cells as plain Rust values, classifying
//! columns into the kinds the cleaning and scoring code cares about, and
//! detecting tabular file formats.

mod format;
mod polars_utils;

pub use format::TableFormat;
pub use polars_utils::{
    ColumnKind, any_to_f64, any_to_string, cell_text, cell_value, format_numeric,
    has_edge_whitespace, missing_count, nan_to_null, parse_f64, parse_i64,
};

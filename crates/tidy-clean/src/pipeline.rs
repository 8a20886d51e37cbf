//! The fixed-order cleaning pipeline.
//!
//! Steps run in this order, each gated by [`CleaningOptions`]:
//!
//! 1. lowercase column names
//! 2. trim whitespace in text cells
//! 3. impute missing values
//! 4. drop rows with missing values
//! 5. drop duplicate rows
//! 6. coerce text columns to numbers
//! 7. drop configured columns
//!
//! Every step returns a new frame; the input is never modified.

use std::collections::{BTreeMap, HashSet};

use polars::prelude::{
    BooleanChunked, ChunkFillNullValue, Column, DataFrame, DataType, IntoColumn, IntoSeries,
    NamedFrom, NewChunkedArray, PolarsResult, Series,
};
use tidy_common::{
    ColumnKind, cell_text, missing_count, nan_to_null, parse_f64, parse_i64,
};
use tracing::{debug, warn};

use crate::error::{CleanError, Result};
use crate::options::{CleaningOptions, FillMethod};
use crate::quality::{QualitySnapshot, duplicate_mask};
use crate::report::CleaningReport;

/// Cleaned frame plus diagnostics.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub cleaned: DataFrame,
    pub report: CleaningReport,
}

/// Rebuilds `df` with `replacements` swapped in by position.
fn replace_columns(
    step: &'static str,
    df: &DataFrame,
    mut replacements: BTreeMap<usize, Column>,
) -> Result<DataFrame> {
    if replacements.is_empty() {
        return Ok(df.clone());
    }
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .enumerate()
        .map(|(idx, column)| replacements.remove(&idx).unwrap_or_else(|| column.clone()))
        .collect();
    DataFrame::new(columns).map_err(|e| CleanError::frame(step, &e))
}

fn filter_rows(step: &'static str, df: &DataFrame, keep: &[bool]) -> Result<DataFrame> {
    if keep.iter().all(|flag| *flag) {
        return Ok(df.clone());
    }
    let mask = BooleanChunked::from_slice(step.into(), keep);
    df.filter(&mask).map_err(|e| CleanError::frame(step, &e))
}

/// Lowercases every column name.
///
/// Returns the input unchanged (and `false`) when lowercasing would make
/// two names collide.
pub fn lowercase_column_names(df: &DataFrame) -> Result<(DataFrame, bool)> {
    let lowered: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_lowercase())
        .collect();
    let unique: HashSet<&str> = lowered.iter().map(String::as_str).collect();
    if unique.len() != lowered.len() {
        warn!("lowercasing column names would create duplicates, keeping original names");
        return Ok((df.clone(), false));
    }
    let columns: Vec<Column> = df
        .get_columns()
        .iter()
        .zip(lowered)
        .map(|(column, name)| column.clone().with_name(name.into()))
        .collect();
    if columns.is_empty() {
        return Ok((df.clone(), true));
    }
    let renamed = DataFrame::new(columns).map_err(|e| CleanError::frame("lowercase", &e))?;
    Ok((renamed, true))
}

/// Trims leading/trailing whitespace in every text cell.
///
/// Returns the frame and the number of cells that changed.
pub fn strip_text_whitespace(df: &DataFrame) -> Result<(DataFrame, usize)> {
    let mut replacements = BTreeMap::new();
    let mut trimmed_cells = 0usize;
    for (idx, column) in df.get_columns().iter().enumerate() {
        if ColumnKind::of_column(column) != ColumnKind::Text {
            continue;
        }
        let mut changed = 0usize;
        let values: Vec<Option<String>> = (0..column.len())
            .map(|row| {
                cell_text(column, row).map(|value| {
                    let trimmed = value.trim();
                    if trimmed.len() == value.len() {
                        value
                    } else {
                        changed += 1;
                        trimmed.to_string()
                    }
                })
            })
            .collect();
        if changed > 0 {
            trimmed_cells += changed;
            replacements.insert(
                idx,
                Series::new(column.name().clone(), values).into_column(),
            );
        }
    }
    let frame = replace_columns("strip_spaces", df, replacements)?;
    Ok((frame, trimmed_cells))
}

/// Most frequent value; ties go to the smallest value.
fn mode(values: &[String]) -> Option<String> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for value in values {
        *counts.entry(value.as_str()).or_insert(0) += 1;
    }
    let mut best: Option<(&str, usize)> = None;
    for (value, count) in counts {
        if best.is_none_or(|(_, top)| count > top) {
            best = Some((value, count));
        }
    }
    best.map(|(value, _)| value.to_string())
}

/// Fills a numeric column with its mean or median, computed by Polars over
/// the non-missing values. The result is `Float64`.
fn fill_numeric(column: &Column, method: FillMethod) -> PolarsResult<Option<(Column, usize)>> {
    let missing = missing_count(column);
    let floats = nan_to_null(&column.cast(&DataType::Float64)?)?;
    let series = floats.as_materialized_series();
    let statistic = match method {
        FillMethod::Mean => series.mean(),
        FillMethod::Median => series.median(),
        FillMethod::None | FillMethod::Mode => None,
    };
    let Some(statistic) = statistic else {
        return Ok(None);
    };
    let filled = series.f64()?.fill_null_with_values(statistic)?;
    Ok(Some((filled.into_series().into_column(), missing)))
}

fn fill_text(column: &Column) -> Option<(Column, usize)> {
    let values: Vec<Option<String>> = (0..column.len())
        .map(|row| cell_text(column, row))
        .collect();
    let present: Vec<String> = values.iter().flatten().cloned().collect();
    let statistic = mode(&present)?;
    let missing = values.len() - present.len();
    let filled: Vec<Option<String>> = values
        .into_iter()
        .map(|v| Some(v.unwrap_or_else(|| statistic.clone())))
        .collect();
    Some((
        Series::new(column.name().clone(), filled).into_column(),
        missing,
    ))
}

/// Imputes missing cells.
///
/// Mean and median touch numeric columns only; mode touches text columns
/// only. Columns with no values to derive a statistic from are left alone.
/// Returns the frame and the number of cells filled.
pub fn fill_missing(df: &DataFrame, method: FillMethod) -> Result<(DataFrame, usize)> {
    if method == FillMethod::None {
        return Ok((df.clone(), 0));
    }
    let mut replacements = BTreeMap::new();
    let mut filled_cells = 0usize;
    for (idx, column) in df.get_columns().iter().enumerate() {
        if missing_count(column) == 0 {
            continue;
        }
        let filled = match (method, ColumnKind::of_column(column)) {
            (FillMethod::Mean | FillMethod::Median, ColumnKind::Numeric) => {
                fill_numeric(column, method).map_err(|e| CleanError::frame("fill_missing", &e))?
            }
            (FillMethod::Mode, ColumnKind::Text) => fill_text(column),
            _ => None,
        };
        match filled {
            Some((replacement, count)) => {
                filled_cells += count;
                replacements.insert(idx, replacement);
            }
            None => debug!(column = %column.name(), method = %method, "no statistic, column left as is"),
        }
    }
    let frame = replace_columns("fill_missing", df, replacements)?;
    Ok((frame, filled_cells))
}

/// Drops every row that has at least one missing cell, NaN included.
pub fn drop_null_rows(df: &DataFrame) -> Result<DataFrame> {
    let columns = df.get_columns();
    if columns.iter().all(|column| missing_count(column) == 0) {
        return Ok(df.clone());
    }
    let normalized = columns
        .iter()
        .map(nan_to_null)
        .collect::<PolarsResult<Vec<Column>>>()
        .and_then(DataFrame::new)
        .map_err(|e| CleanError::frame("remove_nulls", &e))?;
    normalized
        .drop_nulls::<String>(None)
        .map_err(|e| CleanError::frame("remove_nulls", &e))
}

/// Drops rows that repeat an earlier row, keeping the first occurrence.
pub fn drop_duplicate_rows(df: &DataFrame) -> Result<DataFrame> {
    let keep: Vec<bool> = duplicate_mask(df).into_iter().map(|dup| !dup).collect();
    filter_rows("remove_duplicates", df, &keep)
}

fn coerce_column(column: &Column) -> Option<Column> {
    let values: Vec<Option<String>> = (0..column.len())
        .map(|row| cell_text(column, row))
        .collect();
    let name = column.name().clone();

    let present = values.iter().flatten().count();
    if present == 0 {
        let empty: Vec<Option<f64>> = vec![None; values.len()];
        return Some(Series::new(name, empty).into_column());
    }

    let ints: Option<Vec<Option<i64>>> = values
        .iter()
        .map(|value| match value {
            Some(text) => parse_i64(text).map(Some),
            None => Some(None),
        })
        .collect();
    if let Some(ints) = ints {
        return Some(Series::new(name, ints).into_column());
    }

    let floats: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|value| match value {
            Some(text) => parse_f64(text).map(Some),
            None => Some(None),
        })
        .collect();
    floats.map(|floats| Series::new(name, floats).into_column())
}

/// Converts text columns whose values all parse as numbers.
///
/// All-integer columns become `Int64`, other numeric columns `Float64`.
/// Columns with any non-numeric value stay as they are. Returns the frame
/// and the names of converted columns.
pub fn coerce_numeric_columns(df: &DataFrame) -> Result<(DataFrame, Vec<String>)> {
    let mut replacements = BTreeMap::new();
    let mut coerced = Vec::new();
    for (idx, column) in df.get_columns().iter().enumerate() {
        if ColumnKind::of_column(column) != ColumnKind::Text {
            continue;
        }
        match coerce_column(column) {
            Some(replacement) => {
                coerced.push(column.name().to_string());
                replacements.insert(idx, replacement);
            }
            None => debug!(column = %column.name(), "column is not numeric, left unchanged"),
        }
    }
    let frame = replace_columns("coerce_numeric", df, replacements)?;
    Ok((frame, coerced))
}

/// Drops the named columns.
///
/// Names that are not in the frame are ignored and returned as the second
/// list; the first list holds the columns actually removed.
pub fn drop_named_columns(
    df: &DataFrame,
    names: &[String],
) -> Result<(DataFrame, Vec<String>, Vec<String>)> {
    let mut frame = df.clone();
    let mut dropped = Vec::new();
    let mut unknown = Vec::new();
    let mut requested = HashSet::new();
    for name in names {
        if !requested.insert(name.as_str()) {
            continue;
        }
        if frame.column(name).is_ok() {
            frame = frame
                .drop(name)
                .map_err(|e| CleanError::frame("drop_columns", &e))?;
            dropped.push(name.clone());
        } else {
            unknown.push(name.clone());
        }
    }
    if !unknown.is_empty() {
        warn!(columns = ?unknown, "ignoring unknown columns in drop list");
    }
    Ok((frame, dropped, unknown))
}

/// Runs every enabled step over a copy of `input`.
///
/// Quality snapshots are taken of the untouched input and of the final
/// frame.
pub fn clean_dataset(input: &DataFrame, options: &CleaningOptions) -> Result<CleaningOutcome> {
    let before = QualitySnapshot::capture(input);
    let mut report = CleaningReport::new(before);
    let mut frame = input.clone();

    if options.lowercase_columns {
        let (next, applied) = lowercase_column_names(&frame)?;
        report.lowercase_skipped = !applied;
        frame = next;
    }

    if options.strip_spaces {
        let (next, trimmed) = strip_text_whitespace(&frame)?;
        debug!(trimmed_cells = trimmed, "stripped whitespace");
        report.trimmed_cells = trimmed;
        frame = next;
    }

    if options.fill_method != FillMethod::None {
        let (next, filled) = fill_missing(&frame, options.fill_method)?;
        debug!(method = %options.fill_method, filled_cells = filled, "filled missing values");
        report.filled_cells = filled;
        frame = next;
    }

    if options.remove_nulls {
        let rows = frame.height();
        frame = drop_null_rows(&frame)?;
        debug!(removed = rows - frame.height(), "dropped rows with missing values");
    }

    if options.remove_duplicates {
        let rows = frame.height();
        frame = drop_duplicate_rows(&frame)?;
        debug!(removed = rows - frame.height(), "dropped duplicate rows");
    }

    if options.coerce_numeric {
        let (next, coerced) = coerce_numeric_columns(&frame)?;
        debug!(columns = ?coerced, "coerced numeric columns");
        report.coerced_columns = coerced;
        frame = next;
    }

    if !options.drop_columns.is_empty() {
        let (next, dropped, unknown) = drop_named_columns(&frame, &options.drop_columns)?;
        report.dropped_columns = dropped;
        report.unknown_drop_columns = unknown;
        frame = next;
    }

    report.finish(QualitySnapshot::capture(&frame));
    Ok(CleaningOutcome {
        cleaned: frame,
        report,
    })
}

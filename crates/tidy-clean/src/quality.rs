//! Data-quality scoring.
//!
//! The score is a fixed-weight heuristic in `[0, 100]`:
//!
//! - missing cells cost up to 50 points (share of all cells),
//! - duplicate rows cost up to 30 points (share of all rows),
//! - text cells with leading/trailing whitespace cost up to 20 points
//!   (share of all cells).
//!
//! A dataset without rows or without columns scores 0.

use std::collections::HashSet;

use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Serialize};
use tidy_common::{ColumnKind, cell_text, has_edge_whitespace, missing_count};

pub const MISSING_WEIGHT: f64 = 50.0;
pub const DUPLICATE_WEIGHT: f64 = 30.0;
pub const FORMAT_WEIGHT: f64 = 20.0;

/// Counts missing cells across all columns. NaN in float columns counts as missing.
pub fn missing_cell_count(df: &DataFrame) -> usize {
    df.get_columns().iter().map(missing_count).sum()
}

/// Row identity used for duplicate detection; nulls compare equal.
pub(crate) fn row_key(columns: &[Column], idx: usize) -> Vec<Option<String>> {
    columns.iter().map(|column| cell_text(column, idx)).collect()
}

/// Marks rows that repeat an earlier row. The first occurrence is unmarked.
pub(crate) fn duplicate_mask(df: &DataFrame) -> Vec<bool> {
    let columns = df.get_columns();
    let mut seen = HashSet::with_capacity(df.height());
    (0..df.height())
        .map(|idx| !seen.insert(row_key(columns, idx)))
        .collect()
}

/// Counts rows that are exact copies of an earlier row.
pub fn duplicate_row_count(df: &DataFrame) -> usize {
    duplicate_mask(df).into_iter().filter(|dup| *dup).count()
}

/// Counts text cells whose value starts or ends with whitespace.
pub fn whitespace_issue_count(df: &DataFrame) -> usize {
    df.get_columns()
        .iter()
        .filter(|column| ColumnKind::of_column(column) == ColumnKind::Text)
        .map(|column| {
            (0..column.len())
                .filter(|idx| cell_text(column, *idx).is_some_and(|v| has_edge_whitespace(&v)))
                .count()
        })
        .sum()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scores a dataset from its raw counts.
///
/// # Examples
///
/// ```
/// use tidy_clean::score_from_counts;
///
/// // 4 rows x 2 columns, 1 missing, 1 duplicate, 1 padded value
/// assert_eq!(score_from_counts(4, 2, 1, 1, 1), 83.75);
/// assert_eq!(score_from_counts(0, 3, 0, 0, 0), 0.0);
/// ```
pub fn score_from_counts(
    rows: usize,
    columns: usize,
    missing: usize,
    duplicates: usize,
    whitespace: usize,
) -> f64 {
    let total_cells = rows * columns;
    if total_cells == 0 {
        return 0.0;
    }
    let total_cells = total_cells as f64;
    let missing_penalty = (missing as f64 / total_cells) * MISSING_WEIGHT;
    let duplicate_penalty = (duplicates as f64 / rows.max(1) as f64) * DUPLICATE_WEIGHT;
    let format_penalty = (whitespace as f64 / total_cells) * FORMAT_WEIGHT;

    let score = 100.0 - (missing_penalty + duplicate_penalty + format_penalty);
    round2(score.max(0.0))
}

/// Computes the quality score of a dataset.
pub fn quality_score(df: &DataFrame) -> f64 {
    QualitySnapshot::capture(df).score
}

/// Counts and score for one dataset state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualitySnapshot {
    pub rows: usize,
    pub columns: usize,
    pub duplicate_rows: usize,
    pub missing_cells: usize,
    pub whitespace_issues: usize,
    pub score: f64,
}

impl QualitySnapshot {
    pub fn capture(df: &DataFrame) -> Self {
        let rows = df.height();
        let columns = df.width();
        let missing_cells = missing_cell_count(df);
        let duplicate_rows = duplicate_row_count(df);
        let whitespace_issues = whitespace_issue_count(df);
        Self {
            rows,
            columns,
            duplicate_rows,
            missing_cells,
            whitespace_issues,
            score: score_from_counts(
                rows,
                columns,
                missing_cells,
                duplicate_rows,
                whitespace_issues,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};
    use proptest::prelude::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Series::new("id".into(), vec![Some(1i64), Some(1), None, Some(4)]).into_column(),
            Series::new("name".into(), vec!["a", "a", "b", " hi "]).into_column(),
        ])
        .unwrap()
    }

    #[test]
    fn counts_sample_issues() {
        let df = sample();
        assert_eq!(missing_cell_count(&df), 1);
        assert_eq!(duplicate_row_count(&df), 1);
        assert_eq!(whitespace_issue_count(&df), 1);
    }

    #[test]
    fn sample_scores_83_75() {
        assert_eq!(quality_score(&sample()), 83.75);
    }

    #[test]
    fn clean_dataset_scores_100() {
        let df = DataFrame::new(vec![
            Series::new("id".into(), vec![1i64, 2, 3]).into_column(),
            Series::new("name".into(), vec!["a", "b", "c d"]).into_column(),
        ])
        .unwrap();
        assert_eq!(quality_score(&df), 100.0);
    }

    #[test]
    fn empty_dataset_scores_zero() {
        assert_eq!(quality_score(&DataFrame::empty()), 0.0);
        let no_rows = DataFrame::new(vec![
            Series::new("id".into(), Vec::<i64>::new()).into_column(),
        ])
        .unwrap();
        assert_eq!(quality_score(&no_rows), 0.0);
    }

    #[test]
    fn nan_counts_as_missing() {
        let df = DataFrame::new(vec![
            Series::new("x".into(), vec![Some(1.5f64), Some(f64::NAN), Some(3.5)]).into_column(),
            Series::new("y".into(), vec![Some("a"), None, Some("b")]).into_column(),
        ])
        .unwrap();
        assert_eq!(missing_cell_count(&df), 2);
        assert_eq!(quality_score(&df), 83.33);
    }

    #[test]
    fn null_rows_count_as_duplicates_of_each_other() {
        let df = DataFrame::new(vec![
            Series::new("a".into(), vec![None::<i64>, None]).into_column(),
        ])
        .unwrap();
        assert_eq!(duplicate_row_count(&df), 1);
    }

    #[test]
    fn whitespace_ignores_numeric_columns() {
        let df = DataFrame::new(vec![
            Series::new("n".into(), vec![1.5f64, 2.0]).into_column(),
        ])
        .unwrap();
        assert_eq!(whitespace_issue_count(&df), 0);
    }

    #[test]
    fn score_floors_at_zero() {
        // Every cell missing, every row after the first duplicated, every cell padded
        assert_eq!(score_from_counts(10, 1, 10, 9, 10), 3.0);
        assert_eq!(score_from_counts(2, 1, 2, 2, 2), 0.0);
    }

    proptest! {
        #[test]
        fn score_stays_in_bounds(
            rows in 0usize..200,
            columns in 0usize..20,
            missing in 0usize..4000,
            duplicates in 0usize..200,
            whitespace in 0usize..4000,
        ) {
            let cells = rows * columns;
            let score = score_from_counts(
                rows,
                columns,
                missing.min(cells),
                duplicates.min(rows),
                whitespace.min(cells),
            );
            prop_assert!((0.0..=100.0).contains(&score));
        }

        #[test]
        fn score_is_monotone_in_each_count(
            rows in 1usize..100,
            columns in 1usize..10,
            missing in 0usize..500,
            duplicates in 0usize..100,
            whitespace in 0usize..500,
        ) {
            let cells = rows * columns;
            let missing = missing.min(cells - 1);
            let duplicates = duplicates.min(rows - 1);
            let whitespace = whitespace.min(cells - 1);
            let base = score_from_counts(rows, columns, missing, duplicates, whitespace);

            prop_assert!(score_from_counts(rows, columns, missing + 1, duplicates, whitespace) <= base);
            prop_assert!(score_from_counts(rows, columns, missing, duplicates + 1, whitespace) <= base);
            prop_assert!(score_from_counts(rows, columns, missing, duplicates, whitespace + 1) <= base);
        }
    }
}

//! Before/after diagnostics for one cleaning pass.

use serde::{Deserialize, Serialize};

use crate::quality::QualitySnapshot;

/// What a cleaning pass did to one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// Snapshot of the untouched input.
    pub before: QualitySnapshot,
    /// Snapshot of the cleaned frame.
    pub after: QualitySnapshot,
    /// `before.rows - after.rows`.
    pub rows_removed: usize,
    /// Duplicate rows present in the input.
    pub duplicate_rows_found: usize,
    pub trimmed_cells: usize,
    pub filled_cells: usize,
    pub coerced_columns: Vec<String>,
    pub dropped_columns: Vec<String>,
    /// Drop-list names that matched no column.
    pub unknown_drop_columns: Vec<String>,
    /// Lowercasing was requested but skipped because of a name collision.
    pub lowercase_skipped: bool,
}

impl CleaningReport {
    pub(crate) fn new(before: QualitySnapshot) -> Self {
        Self {
            after: before.clone(),
            duplicate_rows_found: before.duplicate_rows,
            before,
            rows_removed: 0,
            trimmed_cells: 0,
            filled_cells: 0,
            coerced_columns: Vec::new(),
            dropped_columns: Vec::new(),
            unknown_drop_columns: Vec::new(),
            lowercase_skipped: false,
        }
    }

    pub(crate) fn finish(&mut self, after: QualitySnapshot) {
        self.rows_removed = self.before.rows.saturating_sub(after.rows);
        self.after = after;
    }

    pub fn rows_after(&self) -> usize {
        self.after.rows
    }

    pub fn missing_before(&self) -> usize {
        self.before.missing_cells
    }

    pub fn missing_after(&self) -> usize {
        self.after.missing_cells
    }

    /// Score change, positive when cleaning helped.
    pub fn score_delta(&self) -> f64 {
        ((self.after.score - self.before.score) * 100.0).round() / 100.0
    }
}

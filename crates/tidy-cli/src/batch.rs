//! Batch driver: one configuration, many files, processed in order.
//!
//! Each file is read, cleaned and written independently; a failure is
//! recorded against that file and the batch moves on.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use tidy_clean::{CleaningOptions, QualitySnapshot, clean_dataset};
use tidy_ingest::{detect_format, read_table};
use tidy_output::{cleaned_output_path, write_table};

use crate::types::{BatchResult, FileOutcome, ScoreEntry};

/// Settings shared by every file of a batch.
#[derive(Debug, Clone, Default)]
pub struct BatchSettings {
    pub options: CleaningOptions,
    /// Where cleaned files go; beside each input when `None`.
    pub output_dir: Option<PathBuf>,
    /// Clean and report without writing files.
    pub dry_run: bool,
}

/// Frames of one processed file, handed to the caller before being dropped.
#[derive(Debug)]
pub struct ProcessedFile {
    pub original: DataFrame,
    pub cleaned: DataFrame,
    pub outcome: FileOutcome,
}

/// Reads, cleans and (unless dry-running) writes one file.
pub fn process_file(path: &Path, settings: &BatchSettings) -> Result<ProcessedFile> {
    let format = detect_format(path)?;
    let original = read_table(path).with_context(|| format!("read {}", path.display()))?;
    let outcome = clean_dataset(&original, &settings.options)
        .with_context(|| format!("clean {}", path.display()))?;

    let output = if settings.dry_run {
        None
    } else {
        let target = cleaned_output_path(path, settings.output_dir.as_deref());
        write_table(&outcome.cleaned, &target, format)
            .with_context(|| format!("write {}", target.display()))?;
        Some(target)
    };

    let report = outcome.report;
    info!(
        rows_before = report.before.rows,
        rows_after = report.after.rows,
        score_before = report.before.score,
        score_after = report.after.score,
        "file cleaned"
    );

    Ok(ProcessedFile {
        original,
        cleaned: outcome.cleaned,
        outcome: FileOutcome {
            input: path.to_path_buf(),
            format: Some(format.to_string()),
            output,
            report: Some(report),
            error: None,
        },
    })
}

/// Cleans every file in order, calling `on_file` for each success.
pub fn run_batch<F>(paths: &[PathBuf], settings: &BatchSettings, mut on_file: F) -> BatchResult
where
    F: FnMut(&ProcessedFile),
{
    let start = Instant::now();
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let span = info_span!("file", path = %path.display());
        let _guard = span.enter();
        match process_file(path, settings) {
            Ok(processed) => {
                on_file(&processed);
                files.push(processed.outcome);
            }
            Err(error) => {
                warn!(error = %format!("{error:#}"), "file skipped");
                files.push(FileOutcome::failed(path.clone(), format!("{error:#}")));
            }
        }
    }
    let has_errors = files.iter().any(|file| file.error.is_some());
    info!(
        file_count = files.len(),
        failed = files.iter().filter(|file| file.error.is_some()).count(),
        duration_ms = start.elapsed().as_millis(),
        "batch complete"
    );
    BatchResult {
        generated_at: chrono::Utc::now().to_rfc3339(),
        options: settings.options.clone(),
        dry_run: settings.dry_run,
        files,
        has_errors,
    }
}

/// Scores files without cleaning them.
pub fn score_files(paths: &[PathBuf]) -> Vec<ScoreEntry> {
    paths
        .iter()
        .map(|path| match read_table(path) {
            Ok(df) => ScoreEntry {
                input: path.clone(),
                snapshot: Some(QualitySnapshot::capture(&df)),
                error: None,
            },
            Err(error) => ScoreEntry {
                input: path.clone(),
                snapshot: None,
                error: Some(error.to_string()),
            },
        })
        .collect()
}

/// Writes the batch result as pretty JSON.
pub fn write_report(result: &BatchResult, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(result).context("serialize report")?;
    std::fs::write(path, json).with_context(|| format!("write report {}", path.display()))?;
    Ok(())
}

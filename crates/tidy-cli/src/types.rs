use std::path::PathBuf;

use serde::Serialize;
use tidy_clean::{CleaningOptions, CleaningReport, QualitySnapshot};

/// Result of cleaning one input file.
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub format: Option<String>,
    /// Written file; `None` on dry runs and failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<CleaningReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileOutcome {
    pub fn failed(input: PathBuf, error: String) -> Self {
        Self {
            input,
            format: None,
            output: None,
            report: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub generated_at: String,
    pub options: CleaningOptions,
    pub dry_run: bool,
    pub files: Vec<FileOutcome>,
    pub has_errors: bool,
}

/// Quality snapshot of one file, or why it could not be read.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreEntry {
    pub input: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<QualitySnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

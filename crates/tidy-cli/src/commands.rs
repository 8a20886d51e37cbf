use anyhow::Result;
use tracing::info_span;

use tidy_cli::batch::{BatchSettings, run_batch, score_files, write_report};
use tidy_cli::types::{BatchResult, ScoreEntry};

use crate::cli::{CleanArgs, ScoreArgs};
use crate::summary::print_preview;

pub fn run_clean(args: &CleanArgs) -> Result<BatchResult> {
    let span = info_span!("clean", file_count = args.files.len());
    let _guard = span.enter();
    let settings = BatchSettings {
        options: args.cleaning.to_options(),
        output_dir: args.output_dir.clone(),
        dry_run: args.dry_run,
    };
    let result = run_batch(&args.files, &settings, |processed| {
        if args.preview > 0 {
            let name = processed.outcome.input.display();
            print_preview(&format!("{name}: original"), &processed.original, args.preview);
            print_preview(&format!("{name}: cleaned"), &processed.cleaned, args.preview);
        }
    });
    if let Some(path) = &args.report {
        write_report(&result, path)?;
    }
    Ok(result)
}

pub fn run_score(args: &ScoreArgs) -> Vec<ScoreEntry> {
    let span = info_span!("score", file_count = args.files.len());
    let _guard = span.enter();
    score_files(&args.files)
}

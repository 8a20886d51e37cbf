//! CLI argument definitions for tidy-sheets.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tidy_clean::{CleaningOptions, FillMethod};

#[derive(Parser)]
#[command(
    name = "tidy-sheets",
    version,
    about = "Clean CSV and Excel files and score their data quality",
    long_about = "Clean CSV and Excel files and score their data quality.\n\n\
                  Each file is cleaned with the same options and written as\n\
                  cleaned_<name> in its original format."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format.
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean files and write cleaned copies.
    Clean(CleanArgs),

    /// Print the quality score of files without cleaning them.
    Score(ScoreArgs),
}

#[derive(Parser)]
pub struct CleanArgs {
    /// CSV or Excel files to clean.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,

    #[command(flatten)]
    pub cleaning: CleaningArgs,

    /// Directory for cleaned files (default: beside each input).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Clean and report without writing files.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the first N rows before and after cleaning.
    #[arg(long = "preview", value_name = "N", default_value_t = 0)]
    pub preview: usize,

    /// Write a JSON report of the batch.
    #[arg(long = "report", value_name = "PATH")]
    pub report: Option<PathBuf>,
}

/// Cleaning step toggles.
#[derive(Args, Debug, Clone, Default)]
pub struct CleaningArgs {
    /// Drop rows with any missing value.
    #[arg(long = "remove-nulls")]
    pub remove_nulls: bool,

    /// Drop repeated rows, keeping the first.
    #[arg(long = "remove-duplicates")]
    pub remove_duplicates: bool,

    /// Fill missing values (mean/median for numbers, mode for text).
    #[arg(long = "fill", value_enum, default_value = "none")]
    pub fill: FillMethodArg,

    /// Lowercase column names.
    #[arg(long = "lowercase-columns")]
    pub lowercase_columns: bool,

    /// Trim leading and trailing spaces in text cells.
    #[arg(long = "strip-spaces")]
    pub strip_spaces: bool,

    /// Convert text columns holding only numbers to numeric.
    #[arg(long = "coerce-numeric")]
    pub coerce_numeric: bool,

    /// Remove a column by name (repeatable).
    #[arg(long = "drop-column", value_name = "NAME")]
    pub drop_columns: Vec<String>,
}

impl CleaningArgs {
    pub fn to_options(&self) -> CleaningOptions {
        CleaningOptions::new()
            .with_remove_nulls(self.remove_nulls)
            .with_remove_duplicates(self.remove_duplicates)
            .with_fill_method(self.fill.into())
            .with_lowercase_columns(self.lowercase_columns)
            .with_strip_spaces(self.strip_spaces)
            .with_coerce_numeric(self.coerce_numeric)
            .with_drop_columns(self.drop_columns.iter().cloned())
    }
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// CSV or Excel files to score.
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum FillMethodArg {
    #[default]
    None,
    Mean,
    Median,
    Mode,
}

impl From<FillMethodArg> for FillMethod {
    fn from(value: FillMethodArg) -> Self {
        match value {
            FillMethodArg::None => FillMethod::None,
            FillMethodArg::Mean => FillMethod::Mean,
            FillMethodArg::Median => FillMethod::Median,
            FillMethodArg::Mode => FillMethod::Mode,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn clean_flags_map_to_options() {
        let cli = Cli::parse_from([
            "tidy-sheets",
            "clean",
            "a.csv",
            "b.xlsx",
            "--strip-spaces",
            "--fill",
            "median",
            "--drop-column",
            "notes",
            "--drop-column",
            "tmp",
        ]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert_eq!(args.files.len(), 2);
        let options = args.cleaning.to_options();
        assert!(options.strip_spaces);
        assert!(!options.remove_nulls);
        assert_eq!(options.fill_method, FillMethod::Median);
        assert_eq!(options.drop_columns, vec!["notes", "tmp"]);
    }

    #[test]
    fn no_flags_means_noop() {
        let cli = Cli::parse_from(["tidy-sheets", "clean", "a.csv"]);
        let Command::Clean(args) = cli.command else {
            panic!("expected clean");
        };
        assert!(args.cleaning.to_options().is_noop());
        assert_eq!(args.preview, 0);
        assert!(!args.dry_run);
    }

    #[test]
    fn files_are_required() {
        assert!(Cli::try_parse_from(["tidy-sheets", "score"]).is_err());
    }
}

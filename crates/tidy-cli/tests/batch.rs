use std::fs;
use std::path::PathBuf;

use tidy_cli::batch::{BatchSettings, run_batch, score_files, write_report};
use tidy_clean::{CleaningOptions, FillMethod};

fn write(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const MESSY: &str = "id,name\n1,a\n1,a\n,b\n4, hi \n";

#[test]
fn cleaned_file_is_written_beside_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "people.csv", MESSY);
    let settings = BatchSettings {
        options: CleaningOptions::new()
            .with_strip_spaces(true)
            .with_remove_duplicates(true),
        ..Default::default()
    };

    let result = run_batch(&[input], &settings, |_| {});

    assert!(!result.has_errors);
    let outcome = &result.files[0];
    let output = outcome.output.clone().unwrap();
    assert_eq!(output, dir.path().join("cleaned_people.csv"));
    let written = fs::read_to_string(&output).unwrap();
    assert_eq!(written.lines().next(), Some("id,name"));
    assert!(written.contains("4,hi"));
    let report = outcome.report.as_ref().unwrap();
    assert_eq!(report.before.score, 83.75);
    assert_eq!(report.rows_after(), 3);
    assert_eq!(report.rows_removed, 1);
}

#[test]
fn output_dir_receives_cleaned_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(&out).unwrap();
    let input = write(dir.path(), "a.csv", "x\n1\n");
    let settings = BatchSettings {
        output_dir: Some(out.clone()),
        ..Default::default()
    };

    let result = run_batch(&[input], &settings, |_| {});

    assert_eq!(result.files[0].output.as_deref(), Some(out.join("cleaned_a.csv").as_path()));
    assert!(out.join("cleaned_a.csv").exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "people.csv", MESSY);
    let settings = BatchSettings {
        options: CleaningOptions::new().with_remove_nulls(true),
        dry_run: true,
        ..Default::default()
    };

    let mut seen = 0;
    let result = run_batch(&[input], &settings, |processed| {
        seen += 1;
        assert_eq!(processed.original.height(), 4);
        assert_eq!(processed.cleaned.height(), 3);
    });

    assert_eq!(seen, 1);
    assert!(result.dry_run);
    assert!(result.files[0].output.is_none());
    assert!(!dir.path().join("cleaned_people.csv").exists());
}

#[test]
fn failing_file_does_not_stop_the_batch() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.csv");
    let unsupported = write(dir.path(), "notes.txt", "hello");
    let good = write(dir.path(), "good.csv", "a,b\n1,2\n");
    let settings = BatchSettings::default();

    let result = run_batch(&[missing, unsupported, good], &settings, |_| {});

    assert!(result.has_errors);
    assert_eq!(result.files.len(), 3);
    assert!(result.files[0].error.is_some());
    assert!(result.files[1].error.is_some());
    assert!(result.files[2].error.is_none());
    assert!(dir.path().join("cleaned_good.csv").exists());
}

#[test]
fn report_lists_options_and_files() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "people.csv", MESSY);
    let settings = BatchSettings {
        options: CleaningOptions::new()
            .with_fill_method(FillMethod::Mean)
            .with_drop_columns(["nope"]),
        dry_run: true,
        ..Default::default()
    };
    let result = run_batch(&[input], &settings, |_| {});
    let report_path = dir.path().join("report.json");

    write_report(&result, &report_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["options"]["fill_method"], "mean");
    assert_eq!(json["dry_run"], true);
    let file = &json["files"][0];
    assert_eq!(file["format"], "csv");
    assert!(file.get("output").is_none());
    assert_eq!(file["report"]["unknown_drop_columns"][0], "nope");
    assert_eq!(file["report"]["filled_cells"], 1);
}

#[test]
fn score_files_reports_unreadable_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(dir.path(), "people.csv", MESSY);
    let bad = dir.path().join("gone.xlsx");

    let entries = score_files(&[good, bad]);

    assert_eq!(entries[0].snapshot.as_ref().unwrap().score, 83.75);
    assert!(entries[1].snapshot.is_none());
    assert!(entries[1].error.is_some());
}

#[test]
fn csv_na_markers_count_as_missing() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "values.csv", "x,y\n1.5,a\nNaN,NA\n3.5,b\n");
    let settings = BatchSettings {
        options: CleaningOptions::new().with_remove_nulls(true),
        dry_run: true,
        ..Default::default()
    };

    let result = run_batch(&[input], &settings, |_| {});

    let report = result.files[0].report.as_ref().unwrap();
    assert_eq!(report.missing_before(), 2);
    assert_eq!(report.before.score, 83.33);
    assert_eq!(report.rows_after(), 2);
    assert_eq!(report.after.score, 100.0);
}

use std::path::Path;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use tidy_cli::types::{BatchResult, FileOutcome, ScoreEntry};
use tidy_common::{any_to_string, cell_value};

pub fn print_summary(result: &BatchResult) {
    if result.dry_run {
        println!("Dry run: no files written");
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Duplicates"),
        header_cell("Missing"),
        header_cell("Score"),
        header_cell("Removed"),
        header_cell("Output"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for file in &result.files {
        table.add_row(outcome_row(file));
    }
    println!("{table}");

    let failures: Vec<&FileOutcome> = result
        .files
        .iter()
        .filter(|file| file.error.is_some())
        .collect();
    if !failures.is_empty() {
        eprintln!("Errors:");
        for file in failures {
            if let Some(error) = &file.error {
                eprintln!("- {}: {error}", file.input.display());
            }
        }
    }
}

fn outcome_row(file: &FileOutcome) -> Vec<Cell> {
    let name = file_cell(&file.input);
    let Some(report) = &file.report else {
        return vec![
            name,
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            Cell::new("failed").fg(Color::Red).add_attribute(Attribute::Bold),
        ];
    };
    let (before, after) = (&report.before, &report.after);
    vec![
        name,
        Cell::new(change(before.rows, after.rows)),
        Cell::new(change(before.columns, after.columns)),
        count_cell(before.duplicate_rows, after.duplicate_rows),
        count_cell(before.missing_cells, after.missing_cells),
        score_cell(before.score, after.score),
        if report.rows_removed > 0 {
            Cell::new(report.rows_removed).fg(Color::Yellow)
        } else {
            dim_cell(0)
        },
        match &file.output {
            Some(path) => Cell::new(path.display()).fg(Color::Green),
            None => dim_cell("-"),
        },
    ]
}

pub fn print_scores(entries: &[ScoreEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Rows"),
        header_cell("Columns"),
        header_cell("Duplicates"),
        header_cell("Missing"),
        header_cell("Whitespace"),
        header_cell("Score"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for entry in entries {
        let name = file_cell(&entry.input);
        match (&entry.snapshot, &entry.error) {
            (Some(snapshot), _) => table.add_row(vec![
                name,
                Cell::new(snapshot.rows),
                Cell::new(snapshot.columns),
                Cell::new(snapshot.duplicate_rows),
                Cell::new(snapshot.missing_cells),
                Cell::new(snapshot.whitespace_issues),
                Cell::new(format!("{:.2}", snapshot.score))
                    .fg(score_color(snapshot.score))
                    .add_attribute(Attribute::Bold),
            ]),
            (None, error) => table.add_row(vec![
                name,
                Cell::new(error.as_deref().unwrap_or("unreadable")).fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        };
    }
    println!("{table}");
}

/// Prints the first `limit` rows of a frame.
pub fn print_preview(title: &str, df: &DataFrame, limit: usize) {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
    let columns = df.get_columns();
    for idx in 0..df.height().min(limit) {
        table.add_row(
            columns
                .iter()
                .map(|column| match cell_value(column, idx) {
                    polars::prelude::AnyValue::Null => dim_cell("null"),
                    value => Cell::new(any_to_string(value)),
                })
                .collect::<Vec<_>>(),
        );
    }
    println!("{title} ({} rows)", df.height());
    println!("{table}");
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn change(before: usize, after: usize) -> String {
    if before == after {
        before.to_string()
    } else {
        format!("{before} → {after}")
    }
}

fn count_cell(before: usize, after: usize) -> Cell {
    let cell = Cell::new(change(before, after));
    if after > 0 {
        cell.fg(Color::Yellow)
    } else if before > 0 {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::DarkGrey)
    }
}

fn score_cell(before: f64, after: f64) -> Cell {
    Cell::new(format!("{before:.2} → {after:.2}"))
        .fg(score_color(after))
        .add_attribute(Attribute::Bold)
}

fn score_color(score: f64) -> Color {
    if score >= 90.0 {
        Color::Green
    } else if score >= 70.0 {
        Color::Yellow
    } else {
        Color::Red
    }
}

fn file_cell(path: &Path) -> Cell {
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

//! Round-trip tests for cleaned file output.

use std::fs;

use polars::prelude::{DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tempfile::TempDir;
use tidy_common::{TableFormat, any_to_string};
use tidy_ingest::read_table;
use tidy_output::{cleaned_output_path, write_table};

fn sample() -> DataFrame {
    DataFrame::new(vec![
        Series::new("id".into(), vec![1i64, 2]).into_column(),
        Series::new("name".into(), vec![Some("ann"), None]).into_column(),
        Series::new("score".into(), vec![Some(9.5f64), Some(7.0)]).into_column(),
        Series::new("active".into(), vec![true, false]).into_column(),
    ])
    .unwrap()
}

#[test]
fn csv_has_header_and_no_index() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("out.csv");

    write_table(&sample(), &path, TableFormat::Csv).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("id,name,score,active"));
    assert!(lines.next().unwrap().starts_with("1,ann,9.5,"));
    assert!(lines.next().unwrap().starts_with("2,,7"));
}

#[test]
fn excel_output_reads_back_with_types() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("out.xlsx");

    write_table(&sample(), &path, TableFormat::Excel).unwrap();
    let df = read_table(&path).unwrap();

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();
    assert_eq!(names, vec!["id", "name", "score", "active"]);
    assert_eq!(df.height(), 2);
    assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("active").unwrap().dtype(), &DataType::Boolean);
    assert_eq!(df.column("name").unwrap().null_count(), 1);
    assert_eq!(
        any_to_string(df.column("score").unwrap().get(0).unwrap()),
        "9.5"
    );
}

#[test]
fn cleaned_file_lands_beside_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("sales.csv");

    let output = cleaned_output_path(&input, None);

    assert_eq!(output, dir.path().join("cleaned_sales.csv"));
}

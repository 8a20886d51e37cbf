//! Workbook reading: first sheet only, first row is the header.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tidy_common::format_numeric;

use crate::csv::check_file_size;
use crate::error::{IngestError, Result};

/// Inferred type of one worksheet column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Empty,
    Int,
    Float,
    Bool,
    Text,
}

impl CellType {
    fn of(cell: &Data) -> Self {
        match cell {
            Data::Empty => Self::Empty,
            Data::String(s) if s.is_empty() => Self::Empty,
            Data::Int(_) => Self::Int,
            Data::Float(v) if v.fract() == 0.0 && v.abs() < 9.0e15 => Self::Int,
            Data::Float(_) => Self::Float,
            Data::Bool(_) => Self::Bool,
            _ => Self::Text,
        }
    }

    fn merge(self, other: Self) -> Self {
        match (self, other) {
            (Self::Empty, next) | (next, Self::Empty) => next,
            (left, right) if left == right => left,
            (Self::Int, Self::Float) | (Self::Float, Self::Int) => Self::Float,
            _ => Self::Text,
        }
    }
}

/// Renders a header or text cell.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

fn cell_to_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        _ => None,
    }
}

/// Blank headers become `Unnamed: <idx>`, repeats get the first free `.<n>` suffix.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut taken: HashSet<String> = HashSet::with_capacity(row.len());
    let mut names = Vec::with_capacity(row.len());
    for (idx, cell) in row.iter().enumerate() {
        let raw = cell_to_string(cell);
        let base = if raw.trim().is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw
        };
        let mut name = base.clone();
        if taken.contains(&name) {
            let count = counts.entry(base.clone()).or_insert(0);
            loop {
                *count += 1;
                name = format!("{base}.{count}");
                if !taken.contains(&name) {
                    break;
                }
            }
        }
        taken.insert(name.clone());
        names.push(name);
    }
    names
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    let cell_type = cells
        .iter()
        .fold(CellType::Empty, |acc, cell| acc.merge(CellType::of(cell)));
    let has_missing = cells.iter().any(|cell| CellType::of(cell) == CellType::Empty);

    let series = match cell_type {
        CellType::Int if !has_missing => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| cell_to_f64(cell).map(|v| v as i64))
                .collect();
            Series::new(name.into(), values)
        }
        CellType::Int | CellType::Float | CellType::Empty => {
            let values: Vec<Option<f64>> = cells.iter().map(|cell| cell_to_f64(cell)).collect();
            Series::new(name.into(), values)
        }
        CellType::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        CellType::Text => {
            let values: Vec<Option<String>> = cells
                .iter()
                .map(|cell| match CellType::of(cell) {
                    CellType::Empty => None,
                    _ => Some(cell_to_string(cell)),
                })
                .collect();
            Series::new(name.into(), values)
        }
    };
    series.into_column()
}

/// Reads the first sheet of a workbook into a Polars DataFrame.
///
/// Integer columns without gaps become `Int64`, other numeric columns
/// `Float64`, boolean columns `Boolean`; anything mixed is read as text.
pub fn read_excel_table(path: &Path) -> Result<DataFrame> {
    check_file_size(path)?;

    let mut workbook = open_workbook_auto(path).map_err(|e| IngestError::Workbook {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err(IngestError::NoSheets {
            path: path.to_path_buf(),
        });
    };
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| IngestError::Workbook {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = header_names(header_row);
    let body: Vec<&[Data]> = rows.collect();

    let empty = Data::Empty;
    let mut columns = Vec::with_capacity(headers.len());
    for (idx, name) in headers.iter().enumerate() {
        let cells: Vec<&Data> = body
            .iter()
            .map(|row| row.get(idx).unwrap_or(&empty))
            .collect();
        columns.push(build_column(name, &cells));
    }
    let df = DataFrame::new(columns)?;

    tracing::debug!(
        path = %path.display(),
        sheet = %sheet,
        rows = df.height(),
        columns = df.width(),
        "loaded workbook"
    );

    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names_fill_blanks_and_dedupe() {
        let row = vec![
            Data::String("id".to_string()),
            Data::Empty,
            Data::String("id".to_string()),
            Data::Float(2024.0),
        ];
        assert_eq!(
            header_names(&row),
            vec!["id", "Unnamed: 1", "id.1", "2024"]
        );
    }

    #[test]
    fn test_header_names_skip_suffixes_already_taken() {
        let row = vec![
            Data::String("a".to_string()),
            Data::String("a".to_string()),
            Data::String("a.1".to_string()),
            Data::String("a".to_string()),
        ];
        assert_eq!(header_names(&row), vec!["a", "a.1", "a.1.1", "a.2"]);
    }

    #[test]
    fn test_cell_type_merge() {
        assert_eq!(CellType::Int.merge(CellType::Float), CellType::Float);
        assert_eq!(CellType::Empty.merge(CellType::Bool), CellType::Bool);
        assert_eq!(CellType::Int.merge(CellType::Text), CellType::Text);
        assert_eq!(CellType::Bool.merge(CellType::Int), CellType::Text);
    }

    #[test]
    fn test_build_column_integers_with_gap_become_float() {
        let one = Data::Float(1.0);
        let gap = Data::Empty;
        let column = build_column("n", &[&one, &gap]);
        assert_eq!(column.dtype(), &polars::prelude::DataType::Float64);
        assert_eq!(column.null_count(), 1);
    }

    #[test]
    fn test_build_column_mixed_is_text() {
        let text = Data::String("a".to_string());
        let number = Data::Int(3);
        let column = build_column("m", &[&text, &number]);
        assert_eq!(column.dtype(), &polars::prelude::DataType::String);
    }
}

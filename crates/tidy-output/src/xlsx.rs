use std::path::Path;

use polars::prelude::{AnyValue, DataFrame};
use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tidy_common::{ColumnKind, any_to_f64, any_to_string, cell_value};

use crate::error::{OutputError, Result};

/// Rows per worksheet, header included.
pub const MAX_SHEET_ROWS: usize = 1_048_576;
/// Columns per worksheet.
pub const MAX_SHEET_COLUMNS: usize = 16_384;

fn fill_workbook(df: &DataFrame, workbook: &mut Workbook) -> std::result::Result<(), XlsxError> {
    let header = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col_idx, column) in df.get_columns().iter().enumerate() {
        // Bounds checked by the caller
        let col = col_idx as u16;
        sheet.write_string_with_format(0, col, column.name().as_str(), &header)?;
        let kind = ColumnKind::of_column(column);
        for row_idx in 0..column.len() {
            let row = (row_idx + 1) as u32;
            match cell_value(column, row_idx) {
                AnyValue::Null => {}
                AnyValue::Boolean(value) => {
                    sheet.write_boolean(row, col, value)?;
                }
                value if kind == ColumnKind::Numeric => match any_to_f64(value.clone()) {
                    Some(number) if number.is_finite() => {
                        sheet.write_number(row, col, number)?;
                    }
                    _ => {
                        sheet.write_string(row, col, any_to_string(value))?;
                    }
                },
                value => {
                    sheet.write_string(row, col, any_to_string(value))?;
                }
            }
        }
    }
    Ok(())
}

/// Writes `df` to a single-sheet workbook with a bold header row.
///
/// Numbers stay numbers, booleans stay booleans, nulls are left blank and
/// everything else is written as text.
pub fn write_excel(df: &DataFrame, path: &Path) -> Result<()> {
    if df.height() + 1 > MAX_SHEET_ROWS || df.width() > MAX_SHEET_COLUMNS {
        return Err(OutputError::SheetLimit {
            rows: df.height(),
            columns: df.width(),
        });
    }
    let mut workbook = Workbook::new();
    fill_workbook(df, &mut workbook)
        .and_then(|()| workbook.save(path))
        .map_err(|source| OutputError::Workbook {
            path: path.to_path_buf(),
            source,
        })
}

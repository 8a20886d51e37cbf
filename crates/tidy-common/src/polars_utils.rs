//! Polars AnyValue utility functions.
//!
//! This module provides helper functions for working with Polars `AnyValue` types,
//! including string conversions, numeric parsing and column classification.

use polars::prelude::{
    AnyValue, Column, DataType, Float32Chunked, Float64Chunked, IntoColumn, IntoSeries, PolarsResult,
};

/// Coarse column classification used by the scorer and the cleaning steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Integer or floating point columns.
    Numeric,
    /// String columns.
    Text,
    /// Booleans, temporal types and anything else.
    Other,
}

impl ColumnKind {
    /// Classifies a Polars dtype.
    ///
    /// # Examples
    ///
    /// ```
    /// use polars::prelude::DataType;
    /// use tidy_common::ColumnKind;
    ///
    /// assert_eq!(ColumnKind::of(&DataType::Int64), ColumnKind::Numeric);
    /// assert_eq!(ColumnKind::of(&DataType::String), ColumnKind::Text);
    /// assert_eq!(ColumnKind::of(&DataType::Boolean), ColumnKind::Other);
    /// ```
    pub fn of(dtype: &DataType) -> Self {
        match dtype {
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64 => Self::Numeric,
            DataType::String => Self::Text,
            _ => Self::Other,
        }
    }

    /// Classifies a column by its dtype.
    pub fn of_column(column: &Column) -> Self {
        Self::of(column.dtype())
    }
}

/// Converts a Polars `AnyValue` to a `String` representation.
///
/// Returns an empty string for `Null`, properly formats numeric types without
/// unnecessary trailing zeros.
///
/// # Examples
///
/// ```
/// use polars::prelude::AnyValue;
/// use tidy_common::any_to_string;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
/// assert_eq!(any_to_string(AnyValue::String("hello")), "hello");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        // Display wraps some values in quotes
        other => {
            let s = other.to_string();
            if s.starts_with('"') && s.ends_with('"') && s.len() >= 2 {
                s[1..s.len() - 1].to_string()
            } else {
                s
            }
        }
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Integer-valued floats like 40.0 are formatted as "40", not "4".
///
/// # Examples
///
/// ```
/// use tidy_common::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(40.0), "40");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Converts an `AnyValue` to `f64`, returning `None` for non-numeric or null values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, returning `None` for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Parses a string as `i64`, returning `None` for invalid or empty strings.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok()
}

/// Reads one cell, treating out-of-range lookups as null.
pub fn cell_value(column: &Column, idx: usize) -> AnyValue<'_> {
    column.get(idx).unwrap_or(AnyValue::Null)
}

/// Reads one cell as text, `None` when the cell is null.
pub fn cell_text(column: &Column, idx: usize) -> Option<String> {
    match cell_value(column, idx) {
        AnyValue::Null => None,
        value => Some(any_to_string(value)),
    }
}

/// Number of missing cells: nulls plus NaN in float columns.
///
/// # Examples
///
/// ```
/// use polars::prelude::{IntoColumn, NamedFrom, Series};
/// use tidy_common::missing_count;
///
/// let column = Series::new("x".into(), vec![Some(1.0f64), Some(f64::NAN), None]).into_column();
/// assert_eq!(missing_count(&column), 2);
/// ```
pub fn missing_count(column: &Column) -> usize {
    let nan = match column.dtype() {
        DataType::Float64 => column
            .as_materialized_series()
            .f64()
            .map(|ca| ca.into_iter().filter(|v| v.is_some_and(f64::is_nan)).count())
            .unwrap_or(0),
        DataType::Float32 => column
            .as_materialized_series()
            .f32()
            .map(|ca| ca.into_iter().filter(|v| v.is_some_and(f32::is_nan)).count())
            .unwrap_or(0),
        _ => 0,
    };
    column.null_count() + nan
}

/// Replaces NaN with null in float columns; other columns are returned as is.
pub fn nan_to_null(column: &Column) -> PolarsResult<Column> {
    let series = column.as_materialized_series();
    let name = column.name().clone();
    let replaced = match column.dtype() {
        DataType::Float64 => series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect::<Float64Chunked>()
            .with_name(name)
            .into_series(),
        DataType::Float32 => series
            .f32()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect::<Float32Chunked>()
            .with_name(name)
            .into_series(),
        _ => return Ok(column.clone()),
    };
    Ok(replaced.into_column())
}

/// True when the value begins or ends with a whitespace character.
///
/// # Examples
///
/// ```
/// use tidy_common::has_edge_whitespace;
///
/// assert!(has_edge_whitespace(" hi"));
/// assert!(has_edge_whitespace("hi\t"));
/// assert!(!has_edge_whitespace("h i"));
/// assert!(!has_edge_whitespace(""));
/// ```
pub fn has_edge_whitespace(value: &str) -> bool {
    value.chars().next().is_some_and(char::is_whitespace)
        || value.chars().next_back().is_some_and(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn test_any_to_string_null() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn test_any_to_string_integers() {
        assert_eq!(any_to_string(AnyValue::Int32(42)), "42");
        assert_eq!(any_to_string(AnyValue::Int64(-100)), "-100");
        assert_eq!(any_to_string(AnyValue::UInt32(0)), "0");
    }

    #[test]
    fn test_any_to_string_floats() {
        assert_eq!(any_to_string(AnyValue::Float64(1.5)), "1.5");
        assert_eq!(any_to_string(AnyValue::Float64(1.0)), "1");
    }

    #[test]
    fn test_any_to_string_boolean() {
        assert_eq!(any_to_string(AnyValue::Boolean(true)), "true");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(parse_f64(" 2.5 "), Some(2.5));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_i64("7"), Some(7));
        assert_eq!(parse_i64("7.5"), None);
    }

    #[test]
    fn test_cell_text_distinguishes_null() {
        let column = Series::new("name".into(), vec![Some("a"), None, Some("")]).into_column();
        assert_eq!(cell_text(&column, 0), Some("a".to_string()));
        assert_eq!(cell_text(&column, 1), None);
        assert_eq!(cell_text(&column, 2), Some(String::new()));
        assert_eq!(cell_text(&column, 9), None);
    }

    #[test]
    fn test_missing_count_includes_nan() {
        let floats =
            Series::new("f".into(), vec![Some(1.0f64), Some(f64::NAN), None, Some(3.0)]).into_column();
        assert_eq!(missing_count(&floats), 2);
        let ints = Series::new("i".into(), vec![Some(1i64), None]).into_column();
        assert_eq!(missing_count(&ints), 1);
        let text = Series::new("t".into(), vec![Some("NaN"), None]).into_column();
        assert_eq!(missing_count(&text), 1);
    }

    #[test]
    fn test_nan_to_null() {
        let floats =
            Series::new("f".into(), vec![Some(1.0f64), Some(f64::NAN), None]).into_column();
        let cleaned = nan_to_null(&floats).unwrap();
        assert_eq!(cleaned.name().as_str(), "f");
        assert_eq!(cleaned.dtype(), &DataType::Float64);
        assert_eq!(cleaned.null_count(), 2);
        assert_eq!(missing_count(&cleaned), 2);

        let ints = Series::new("i".into(), vec![1i64, 2]).into_column();
        assert_eq!(nan_to_null(&ints).unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_column_kind() {
        assert_eq!(ColumnKind::of(&DataType::Float32), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::UInt8), ColumnKind::Numeric);
        assert_eq!(ColumnKind::of(&DataType::Null), ColumnKind::Other);
    }
}

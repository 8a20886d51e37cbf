//! Cleaning configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How missing cells are imputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillMethod {
    /// Leave missing cells alone.
    #[default]
    None,
    /// Numeric columns get the column mean.
    Mean,
    /// Numeric columns get the column median.
    Median,
    /// Text columns get the most frequent value.
    Mode,
}

impl FillMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Mean => "mean",
            Self::Median => "median",
            Self::Mode => "mode",
        }
    }
}

impl fmt::Display for FillMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags for one cleaning pass, applied identically to every file of a batch.
///
/// Every flag defaults to off, so `CleaningOptions::default()` produces a
/// copy of the input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningOptions {
    /// Drop rows containing any missing value.
    pub remove_nulls: bool,
    /// Drop rows that repeat an earlier row exactly.
    pub remove_duplicates: bool,
    /// Imputation applied before row removal.
    pub fill_method: FillMethod,
    /// Lowercase column names.
    pub lowercase_columns: bool,
    /// Trim leading/trailing whitespace in text cells.
    pub strip_spaces: bool,
    /// Convert text columns that hold only numbers.
    pub coerce_numeric: bool,
    /// Columns removed last; matched against the (possibly lowercased) names.
    pub drop_columns: Vec<String>,
}

impl CleaningOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_remove_nulls(mut self, enable: bool) -> Self {
        self.remove_nulls = enable;
        self
    }

    #[must_use]
    pub fn with_remove_duplicates(mut self, enable: bool) -> Self {
        self.remove_duplicates = enable;
        self
    }

    #[must_use]
    pub fn with_fill_method(mut self, method: FillMethod) -> Self {
        self.fill_method = method;
        self
    }

    #[must_use]
    pub fn with_lowercase_columns(mut self, enable: bool) -> Self {
        self.lowercase_columns = enable;
        self
    }

    #[must_use]
    pub fn with_strip_spaces(mut self, enable: bool) -> Self {
        self.strip_spaces = enable;
        self
    }

    #[must_use]
    pub fn with_coerce_numeric(mut self, enable: bool) -> Self {
        self.coerce_numeric = enable;
        self
    }

    #[must_use]
    pub fn with_drop_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.drop_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// True when no step is enabled.
    pub fn is_noop(&self) -> bool {
        !self.remove_nulls
            && !self.remove_duplicates
            && self.fill_method == FillMethod::None
            && !self.lowercase_columns
            && !self.strip_spaces
            && !self.coerce_numeric
            && self.drop_columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_noop() {
        assert!(CleaningOptions::default().is_noop());
        assert!(!CleaningOptions::new().with_strip_spaces(true).is_noop());
        assert!(!CleaningOptions::new().with_drop_columns(["a"]).is_noop());
    }

    #[test]
    fn fill_method_serializes_lowercase() {
        let json = serde_json::to_string(&FillMethod::Median).unwrap();
        assert_eq!(json, "\"median\"");
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: CleaningOptions =
            serde_json::from_str(r#"{"remove_duplicates": true, "fill_method": "mode"}"#).unwrap();
        assert!(options.remove_duplicates);
        assert_eq!(options.fill_method, FillMethod::Mode);
        assert!(options.drop_columns.is_empty());
    }
}

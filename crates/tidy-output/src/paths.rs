use std::path::{Path, PathBuf};

/// Prefix added to cleaned file names.
pub const CLEANED_PREFIX: &str = "cleaned_";

/// Location of the cleaned copy of `input`.
///
/// The file keeps its name with a `cleaned_` prefix and lands in
/// `output_dir` when given, otherwise next to the input.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use tidy_output::cleaned_output_path;
///
/// assert_eq!(
///     cleaned_output_path(Path::new("data/sales.csv"), None),
///     PathBuf::from("data/cleaned_sales.csv")
/// );
/// assert_eq!(
///     cleaned_output_path(Path::new("data/sales.xlsx"), Some(Path::new("out"))),
///     PathBuf::from("out/cleaned_sales.xlsx")
/// );
/// ```
pub fn cleaned_output_path(input: &Path, output_dir: Option<&Path>) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    let dir = match output_dir {
        Some(dir) => dir.to_path_buf(),
        None => input.parent().map(Path::to_path_buf).unwrap_or_default(),
    };
    dir.join(format!("{CLEANED_PREFIX}{file_name}"))
}

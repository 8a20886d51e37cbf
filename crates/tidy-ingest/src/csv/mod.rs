//! CSV file reading.

mod reader;

pub use reader::{
    MAX_FILE_SIZE, NA_TOKENS, check_file_size, check_file_size_with_limit, read_csv_table,
};

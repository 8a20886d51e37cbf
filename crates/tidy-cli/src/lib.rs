//! Library side of the tidy-sheets command line: batch driver, logging and
//! serializable batch results.

pub mod batch;
pub mod logging;
pub mod types;

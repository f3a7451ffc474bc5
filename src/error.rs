//! Error types for the audit tool

use thiserror::Error;

/// Result type alias using our custom Error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the audit tool
#[derive(Error, Debug)]
pub enum Error {
    /// A required column is absent from an input file. Raised before any
    /// computation, carrying the columns actually present.
    #[error("column '{column}' missing in {file} (columns: {present:?})")]
    MissingColumn {
        file: String,
        column: String,
        present: Vec<String>,
    },

    #[error("CSV error in {file}: {message}")]
    Csv { file: String, message: String },

    #[error("chart rendering failed: {0}")]
    Plot(String),
}

//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading the dataset.
///
/// Every variant is fatal to startup: the dataset is read once and a failure
/// is never retried.
#[derive(Debug, Error)]
pub enum DataError {
    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV transport error (bad quoting, ragged rows, invalid UTF-8)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Required column missing from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

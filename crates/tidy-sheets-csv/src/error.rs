//! CSV error types

use thiserror::Error;

/// Result type for CSV operations
pub type CsvResult<T> = std::result::Result<T, CsvError>;

/// Errors that can occur during CSV operations
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed record or invalid UTF-8
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl CsvError {
    /// True when the failure came from the underlying file rather than its contents
    pub fn is_io_error(&self) -> bool {
        match self {
            CsvError::Io(_) => true,
            CsvError::Csv(e) => e.is_io_error(),
        }
    }

    /// The underlying IO failure, if this error is one
    pub fn into_io_error(self) -> Result<std::io::Error, CsvError> {
        match self {
            CsvError::Io(e) => Ok(e),
            CsvError::Csv(e) if e.is_io_error() => Ok(std::io::Error::from(e)),
            other => Err(other),
        }
    }
}

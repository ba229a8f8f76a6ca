//! Error types for tidy-sheets-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or editing the in-memory model
#[derive(Debug, Error)]
pub enum Error {
    /// Cell reference could not be parsed
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Range reference could not be parsed
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u16, u16),

    #[error("Sheet index {0} out of bounds (count: {1})")]
    SheetOutOfBounds(usize, usize),

    #[error("Invalid sheet name: {0}")]
    InvalidSheetName(String),

    /// Sheet names are compared case-insensitively
    #[error("Sheet name already exists: {0}")]
    DuplicateSheetName(String),

    /// A merge overlaps an existing merged region
    #[error("Cell range {0} overlaps a merged region")]
    MergedCellConflict(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }
}

//! Errors returned at the operation boundary

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tidy_sheets_csv::CsvError;
use tidy_sheets_xlsx::XlsxError;

/// Result type for formatter operations
pub type FormatterResult<T> = std::result::Result<T, FormatterError>;

#[derive(Debug, Error)]
pub enum FormatterError {
    /// No input path, or the path does not exist
    #[error("{}", missing_file_message(.0))]
    MissingFile(PathBuf),

    /// The file is not a spreadsheet this tool can read
    #[error("Unsupported or corrupt spreadsheet: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Options file unreadable or holding invalid values
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),
}

fn missing_file_message(path: &Path) -> String {
    if path.as_os_str().is_empty() {
        "No input file given".to_string()
    } else {
        format!("File not found: {}", path.display())
    }
}

impl FormatterError {
    pub(crate) fn format<S: Into<String>>(msg: S) -> Self {
        FormatterError::Format(msg.into())
    }

    pub(crate) fn config<S: Into<String>>(msg: S) -> Self {
        FormatterError::Config(msg.into())
    }
}

impl From<XlsxError> for FormatterError {
    fn from(err: XlsxError) -> Self {
        match err.into_io_error() {
            Ok(e) => FormatterError::Io(e),
            Err(other) => FormatterError::Format(other.to_string()),
        }
    }
}

impl From<CsvError> for FormatterError {
    fn from(err: CsvError) -> Self {
        match err.into_io_error() {
            Ok(e) => FormatterError::Io(e),
            Err(other) => FormatterError::Format(other.to_string()),
        }
    }
}

impl From<tidy_sheets_core::Error> for FormatterError {
    fn from(err: tidy_sheets_core::Error) -> Self {
        FormatterError::Format(err.to_string())
    }
}

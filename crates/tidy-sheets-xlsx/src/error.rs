//! XLSX error types

use thiserror::Error;

pub type XlsxResult<T> = std::result::Result<T, XlsxError>;

#[derive(Debug, Error)]
pub enum XlsxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The container opened but is not a spreadsheet package
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// A part parsed as XML but held a value that makes no sense
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Core error: {0}")]
    Core(#[from] tidy_sheets_core::Error),
}

impl XlsxError {
    /// Split off failures of the underlying file from failures of its contents
    pub fn into_io_error(self) -> Result<std::io::Error, XlsxError> {
        match self {
            XlsxError::Io(e) => Ok(e),
            XlsxError::Zip(zip::result::ZipError::Io(e)) => Ok(e),
            other => Err(other),
        }
    }
}

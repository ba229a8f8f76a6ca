//! # tidy-sheets-csv
//!
//! Reads and writes [`Table`](tidy_sheets_core::Table)s as CSV. The first record
//! is always the header. Short records are padded, so every row has the same width.

mod error;
mod options;
mod reader;
mod writer;

pub use error::{CsvError, CsvResult};
pub use options::{CsvReadOptions, CsvWriteOptions, LineTerminator};
pub use reader::CsvReader;
pub use writer::CsvWriter;

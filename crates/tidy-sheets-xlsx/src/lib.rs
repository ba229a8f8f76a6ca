//! # tidy-sheets-xlsx
//!
//! XLSX (Office Open XML) reader and writer for tidy-sheets.
//!
//! The reader loads every sheet with its styles, column widths, row heights,
//! merged regions and frozen panes. Numbers stored under a date format come back
//! as [`CellValue::DateTime`](tidy_sheets_core::CellValue::DateTime). The writer
//! produces a minimal package that Excel and LibreOffice open without repair.

pub mod error;
pub mod reader;
pub mod writer;

mod styles;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
pub use writer::XlsxWriter;

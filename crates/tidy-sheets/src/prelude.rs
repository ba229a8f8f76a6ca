//! Common imports for tidy-sheets users
//!
//! ```rust
//! use tidy_sheets::prelude::*;
//! ```

pub use crate::{
    CellValue, FormatOptions, FormatterError, FormatterResult, Operation, Report, Request, Style,
    Table, Workbook, Worksheet,
};

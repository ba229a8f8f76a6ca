//! # tidy-sheets-core
//!
//! Data model shared by the tidy-sheets crates.
//!
//! Two views of a spreadsheet live here:
//! - [`Workbook`] / [`Worksheet`] hold styled cells plus sheet-level attributes
//!   (column widths, frozen panes, merged regions). Formatting operations work on these.
//! - [`Table`] is a plain grid of [`CellValue`]s with no styling. Row filtering and
//!   sorting work on these.
//!
//! ## Example
//!
//! ```rust
//! use tidy_sheets_core::{CellValue, Style, Workbook};
//!
//! let mut workbook = Workbook::new();
//! let sheet = workbook.active_worksheet_mut();
//!
//! sheet.set_cell_value("A1", "Product").unwrap();
//! sheet.set_cell_value_at(1, 0, CellValue::Number(12.5)).unwrap();
//! sheet.set_cell_style_at(0, 0, &Style::new().bold(true)).unwrap();
//! sheet.set_freeze_panes(1, 0);
//! ```

pub mod cell;
pub mod error;
pub mod style;
pub mod table;
pub mod workbook;
pub mod worksheet;

pub use cell::{CellAddress, CellData, CellError, CellRange, CellValue, SharedString};
pub use error::{Error, Result};
pub use table::{Row, Table};
pub use workbook::Workbook;
pub use worksheet::{FreezePanes, Worksheet};

pub use style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, PatternType, Style, StylePool, VerticalAlignment,
};

/// Maximum number of rows in a worksheet (Excel limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (Excel limit)
pub const MAX_COLS: u16 = 16_384;

/// Maximum length of a sheet name
pub const MAX_SHEET_NAME_LEN: usize = 31;

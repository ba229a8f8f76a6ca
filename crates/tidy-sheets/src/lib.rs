//! # tidy-sheets
//!
//! Cosmetic and cleanup operations for spreadsheet files.
//!
//! Each operation loads a file, applies one transform and writes the result next to
//! the input as `<stem>_formatted<ext>`. The source file is never modified.
//!
//! - Formatting operations (header styling, column widths, borders, number formats,
//!   alignment, frozen header) work on the active sheet of an `.xlsx` workbook.
//! - Row operations (blank and duplicate removal, sorting) work on the values of the
//!   first sheet and also accept `.csv`.
//! - [`Operation::FullFormat`] chains the row cleanup with every style.
//!
//! ## Example
//!
//! ```rust,no_run
//! use tidy_sheets::prelude::*;
//!
//! let report = Operation::RemoveDuplicates.run(&Request::new("sales.xlsx"))?;
//! println!("{}", report); // Removed 1 duplicate rows -> sales_formatted.xlsx
//!
//! // or by name
//! let report = tidy_sheets::run("full-format", &Request::new("sales.xlsx"))?;
//! assert!(report.output.ends_with("sales_formatted.xlsx"));
//! # Ok::<(), FormatterError>(())
//! ```
//!
//! The transforms are also available on in-memory data through [`ops`].

pub mod error;
pub mod io;
pub mod operation;
pub mod ops;
pub mod options;
pub mod prelude;
pub mod sample;

mod pipeline;

pub use error::{FormatterError, FormatterResult};
pub use operation::{run, Operation, Report, Request};
pub use options::FormatOptions;
pub use sample::{sample_workbook, write_sample};

// Re-export the data model and file formats
pub use tidy_sheets_core::{
    Alignment, BorderStyle, CellAddress, CellRange, CellValue, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, Style, Table, VerticalAlignment, Workbook, Worksheet,
};
pub use tidy_sheets_csv::{CsvError, CsvReader, CsvWriter};
pub use tidy_sheets_xlsx::{XlsxError, XlsxReader, XlsxWriter};

//! Cell values, addresses and sparse cell storage

mod address;
mod storage;
mod value;

pub use address::{CellAddress, CellRange};
pub use storage::{CellData, CellStorage};
pub use value::{excel_serial_to_datetime, datetime_to_excel_serial, CellError, CellValue, SharedString};

//! End-to-end tests for tidy-sheets-xlsx.
//!
//! Each test builds a workbook in memory, writes it with `XlsxWriter`, reads the
//! bytes back with `XlsxReader` and checks what survived. Tests that need a real
//! file go through a `tempfile` directory.

mod common;
mod roundtrip;

pub use common::*;

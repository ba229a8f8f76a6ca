//! Common utilities for E2E tests.

use std::io::Cursor;

use tidy_sheets_core::{CellValue, Workbook};
use tidy_sheets_xlsx::{XlsxReader, XlsxWriter};

/// Write `workbook` to an in-memory package and read it back.
pub fn roundtrip(workbook: &Workbook) -> Workbook {
    let mut buf = Cursor::new(Vec::new());
    XlsxWriter::write(workbook, &mut buf).expect("write should succeed");
    buf.set_position(0);
    XlsxReader::read(buf).expect("read should succeed")
}

/// A small product table like the ones the formatter is pointed at.
pub fn product_workbook() -> Workbook {
    let mut wb = Workbook::new();
    let ws = wb.active_worksheet_mut();
    let rows: [[CellValue; 3]; 3] = [
        ["ID".into(), "Название".into(), "Цена".into()],
        [1.into(), "Товар А".into(), 1500.5.into()],
        [2.into(), "Товар Б".into(), 320.0.into()],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            ws.set_cell_value_at(r as u32, c as u16, value.clone())
                .expect("in bounds");
        }
    }
    wb
}

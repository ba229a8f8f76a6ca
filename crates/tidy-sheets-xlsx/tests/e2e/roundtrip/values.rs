//! Cell values through a write and read.

use crate::{product_workbook, roundtrip};
use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use tidy_sheets_core::{CellError, CellValue, NumberFormat, Style, Table, Workbook};
use tidy_sheets_xlsx::{XlsxReader, XlsxWriter};

#[test]
fn test_basic_values() {
    let wb = product_workbook();
    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();

    assert_eq!(ws.name(), "Sheet1");
    assert_eq!(ws.value_at(0, 1), &CellValue::string("Название"));
    assert_eq!(ws.value_at(1, 0), &CellValue::Number(1.0));
    assert_eq!(ws.value_at(1, 2), &CellValue::Number(1500.5));
    assert_eq!(ws.value_at(2, 1), &CellValue::string("Товар Б"));
}

#[test]
fn test_booleans_errors_and_formulas() {
    let mut wb = Workbook::new();
    let ws = wb.active_worksheet_mut();
    ws.set_cell_value("A1", true).unwrap();
    ws.set_cell_value("B1", false).unwrap();
    ws.set_cell_value("C1", CellError::Na).unwrap();
    ws.set_cell_value(
        "D1",
        CellValue::Formula {
            text: "=SUM(A2:A3)".into(),
            cached_value: Some(Box::new(CellValue::Number(7.0))),
        },
    )
    .unwrap();
    ws.set_cell_value("E1", CellValue::formula("NOW()")).unwrap();

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.value_at(0, 0), &CellValue::Boolean(true));
    assert_eq!(ws.value_at(0, 1), &CellValue::Boolean(false));
    assert_eq!(ws.value_at(0, 2), &CellValue::Error(CellError::Na));
    assert_eq!(
        ws.value_at(0, 3),
        &CellValue::Formula {
            text: "=SUM(A2:A3)".into(),
            cached_value: Some(Box::new(CellValue::Number(7.0))),
        }
    );
    assert_eq!(ws.value_at(0, 4), &CellValue::formula("NOW()"));
}

#[test]
fn test_text_with_markup_and_whitespace() {
    let mut wb = Workbook::new();
    let ws = wb.active_worksheet_mut();
    ws.set_cell_value("A1", "a < b & \"c\"").unwrap();
    ws.set_cell_value("A2", "  indented").unwrap();
    ws.set_cell_value("A3", "line1\nline2").unwrap();

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.value_at(0, 0), &CellValue::string("a < b & \"c\""));
    assert_eq!(ws.value_at(1, 0), &CellValue::string("  indented"));
    assert_eq!(ws.value_at(2, 0), &CellValue::string("line1\nline2"));
}

#[test]
fn test_dates_come_back_as_dates() {
    let dt = NaiveDate::from_ymd_opt(2024, 3, 15)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap();

    let mut wb = Workbook::new();
    let ws = wb.active_worksheet_mut();
    ws.set_cell_value("A1", CellValue::date_time(dt)).unwrap();
    ws.set_cell_style_at(
        0,
        0,
        &Style::new().number_format(NumberFormat::Custom("yyyy-mm-dd hh:mm:ss".into())),
    )
    .unwrap();
    // Same serial without a date format stays a number
    ws.set_cell_value("B1", CellValue::Number(45366.0)).unwrap();

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.value_at(0, 0).as_datetime(), Some(dt));
    assert_eq!(ws.value_at(0, 1), &CellValue::Number(45366.0));
}

#[test]
fn test_table_survives_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.xlsx");

    let wb = product_workbook();
    let table = Table::from_worksheet(wb.worksheet(0).unwrap());

    let mut out = Workbook::empty();
    out.add_existing_worksheet(table.to_worksheet().unwrap())
        .unwrap();
    XlsxWriter::write_file(&out, &path).unwrap();

    let back = XlsxReader::read_file(&path).unwrap();
    assert_eq!(Table::from_worksheet(back.worksheet(0).unwrap()), table);
}

#[test]
fn test_reading_a_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = XlsxReader::read_file(dir.path().join("nope.xlsx"));
    assert!(matches!(result, Err(tidy_sheets_xlsx::XlsxError::Io(_))));
}

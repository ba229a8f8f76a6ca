//! Sheet-level attributes: widths, heights, panes, merges, active tab.

use crate::{product_workbook, roundtrip};
use pretty_assertions::assert_eq;
use tidy_sheets_core::{CellRange, FreezePanes};

#[test]
fn test_column_widths() {
    let mut wb = product_workbook();
    let ws = wb.active_worksheet_mut();
    ws.set_column_width(0, 4.0);
    ws.set_column_width(1, 9.0);
    ws.set_column_width(2, 50.0);

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.column_width(0), 4.0);
    assert_eq!(ws.column_width(1), 9.0);
    assert_eq!(ws.column_width(2), 50.0);
    // Untouched columns keep the default
    assert_eq!(ws.column_width(3), 8.43);
}

#[test]
fn test_row_heights_and_hidden_rows_and_columns() {
    let mut wb = product_workbook();
    let ws = wb.active_worksheet_mut();
    ws.set_row_height(0, 24.0);
    ws.set_row_hidden(2, true);
    ws.set_row_hidden(10, true);
    ws.set_column_hidden(5, true);

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    assert_eq!(ws.row_height(0), 24.0);
    assert_eq!(ws.row_height(1), 15.0);
    assert!(ws.is_row_hidden(2));
    assert!(ws.is_row_hidden(10));
    assert!(!ws.is_row_hidden(1));
    assert!(ws.is_column_hidden(5));
}

#[test]
fn test_freeze_header() {
    let mut wb = product_workbook();
    wb.active_worksheet_mut().set_freeze_panes(1, 0);

    let back = roundtrip(&wb);
    let panes = back.worksheet(0).unwrap().freeze_panes().copied();
    assert_eq!(panes, Some(FreezePanes { row: 1, col: 0 }));
    assert_eq!(panes.unwrap().top_left_cell().to_a1_string(), "A2");
}

#[test]
fn test_freeze_rows_and_columns() {
    let mut wb = product_workbook();
    wb.active_worksheet_mut().set_freeze_panes(2, 1);

    let back = roundtrip(&wb);
    let panes = back.worksheet(0).unwrap().freeze_panes().copied();
    assert_eq!(panes, Some(FreezePanes { row: 2, col: 1 }));
}

#[test]
fn test_no_panes_by_default() {
    let back = roundtrip(&product_workbook());
    assert!(back.worksheet(0).unwrap().freeze_panes().is_none());
}

#[test]
fn test_merged_regions() {
    let mut wb = product_workbook();
    let range = CellRange::parse("A5:C5").unwrap();
    wb.active_worksheet_mut().merge_cells(&range).unwrap();

    let back = roundtrip(&wb);
    assert_eq!(back.worksheet(0).unwrap().merged_regions(), &[range]);
}

#[test]
fn test_active_tab_and_hidden_sheet() {
    let mut wb = product_workbook();
    wb.add_worksheet_with_name("Hidden").unwrap();
    wb.add_worksheet_with_name("Report").unwrap();
    wb.worksheet_mut(1).unwrap().set_visible(false);
    wb.set_active_sheet(2).unwrap();

    let back = roundtrip(&wb);
    assert_eq!(back.sheet_count(), 3);
    assert_eq!(back.active_sheet(), 2);
    assert!(!back.worksheet(1).unwrap().is_visible());
    assert!(back.worksheet(2).unwrap().is_visible());
}

//! Shared fixtures for the operation tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tidy_sheets::{CellValue, Workbook, XlsxReader, XlsxWriter};

/// Write `rows` as the first sheet of `<dir>/<name>`
pub fn write_xlsx(dir: &Path, name: &str, rows: &[Vec<CellValue>]) -> PathBuf {
    let mut workbook = Workbook::new();
    let sheet = workbook.active_worksheet_mut();
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .set_cell_value_at(r as u32, c as u16, value.clone())
                    .unwrap();
            }
        }
    }
    let path = dir.join(name);
    XlsxWriter::write_file(&workbook, &path).unwrap();
    path
}

pub fn read_xlsx(path: &Path) -> Workbook {
    XlsxReader::read_file(path).unwrap()
}

/// Header plus ten numbered rows, with two blank rows after the fifth
/// and a copy of row 1 at the end
pub fn messy_rows() -> Vec<Vec<CellValue>> {
    let mut rows: Vec<Vec<CellValue>> = vec![vec!["id".into(), "name".into(), "price".into()]];
    for i in 1..=10 {
        rows.push(vec![
            i.into(),
            format!("Item {}", i).into(),
            (i as f64 * 10.5).into(),
        ]);
        if i == 5 {
            rows.push(vec![CellValue::Empty; 3]);
            rows.push(vec![CellValue::Empty; 3]);
        }
    }
    rows.push(vec![1.into(), "Item 1".into(), 10.5.into()]);
    rows
}

/// Files in `dir`, sorted by name
pub fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

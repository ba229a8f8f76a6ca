//! Demonstration workbook with something for every operation to fix

use std::path::Path;

use chrono::NaiveDate;
use tidy_sheets_core::table::DATETIME_FORMAT;
use tidy_sheets_core::{CellValue, NumberFormat, Style, Workbook};

use crate::error::{FormatterError, FormatterResult};
use crate::io::{save_table, save_workbook, FileKind};

pub const SAMPLE_HEADER: [&str; 6] = ["ID", "Название", "Количество", "Цена", "Статус", "Дата"];

const PRODUCTS: [(&str, u32, f64, &str); 10] = [
    ("Товар А", 15, 1250.0, "В наличии"),
    ("Товар Б", 3, 899.99, "Мало"),
    ("Товар В", 42, 150.5, "В наличии"),
    ("Товар Г", 0, 3200.0, "Нет в наличии"),
    ("Товар Д", 8, 475.25, "В наличии"),
    ("Товар Е", 21, 64.9, "В наличии"),
    ("Товар Ж", 5, 12500.0, "Мало"),
    ("Товар З", 0, 780.0, "Под заказ"),
    ("Товар И", 33, 215.75, "В наличии"),
    ("Товар К", 12, 1999.0, "В наличии"),
];

/// Data rows are shifted down by this many blank rows after the fifth product
const BLANK_ROWS_AFTER: usize = 5;
const BLANK_ROWS: usize = 2;
/// The product repeated at the end
const DUPLICATED: usize = 2;

/// Ten products, two blank rows after the fifth, and a repeat of the third
pub fn sample_workbook() -> FormatterResult<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.active_worksheet_mut();
    let date_style = Style::new().number_format(NumberFormat::Custom(DATETIME_FORMAT.into()));

    for (col, title) in SAMPLE_HEADER.iter().enumerate() {
        sheet.set_cell_value_at(0, col as u16, *title)?;
    }

    let order = (0..PRODUCTS.len()).chain(std::iter::once(DUPLICATED));
    let mut row = 1u32;
    for (n, index) in order.enumerate() {
        if n == BLANK_ROWS_AFTER {
            row += BLANK_ROWS as u32;
        }
        let (name, quantity, price, status) = PRODUCTS[index];
        let date = NaiveDate::from_ymd_opt(2024, 1, 1 + index as u32)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .ok_or_else(|| FormatterError::format("sample date out of range"))?;

        let values: [CellValue; 6] = [
            (index as i64 + 1).into(),
            name.into(),
            f64::from(quantity).into(),
            price.into(),
            status.into(),
            CellValue::date_time(date),
        ];
        for (col, value) in values.into_iter().enumerate() {
            sheet.set_cell_value_at(row, col as u16, value)?;
        }
        sheet.set_cell_style_at(row, 5, &date_style)?;
        row += 1;
    }

    Ok(workbook)
}

/// Write the sample as `.xlsx`, or as `.csv` for the table operations
pub fn write_sample(path: &Path) -> FormatterResult<()> {
    let workbook = sample_workbook()?;
    match FileKind::from_path(path)? {
        FileKind::Xlsx => save_workbook(&workbook, path)?,
        FileKind::Csv => {
            let sheet = workbook
                .worksheet(0)
                .ok_or_else(|| FormatterError::format("sample has no sheet"))?;
            save_table(&tidy_sheets_core::Table::from_worksheet(sheet), path)?;
        }
    }
    tracing::info!(path = %path.display(), "wrote sample workbook");
    Ok(())
}

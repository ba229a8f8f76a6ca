//! Cell-level formatting of a worksheet
//!
//! These functions only touch style and sheet attributes. Values are never changed.

use tidy_sheets_core::{
    BorderStyle, CellValue, HorizontalAlignment, VerticalAlignment, Worksheet,
};

use crate::error::FormatterResult;
use crate::options::FormatOptions;

/// Style row 0 as a header, across every used column (at least column A)
pub fn format_headers(sheet: &mut Worksheet, options: &FormatOptions) -> FormatterResult<()> {
    let font = options.header_font()?;
    let fill = options.header_fill()?;
    let alignment = options.header_alignment();
    let last_col = sheet.max_col().unwrap_or(0);

    for col in 0..=last_col {
        sheet.update_cell_style_at(0, col, |style| {
            style.font = font.clone();
            style.fill = fill;
            style.alignment = alignment;
        })?;
    }
    tracing::debug!(columns = u32::from(last_col) + 1, "styled header row");
    Ok(())
}

/// Set each used column to the width of its longest value plus padding, capped
pub fn auto_fit_columns(sheet: &mut Worksheet, options: &FormatOptions) {
    let Some(last_col) = sheet.max_col() else {
        return;
    };

    let mut longest = vec![0usize; last_col as usize + 1];
    for (_, col, cell) in sheet.iter_cells() {
        if cell.value.is_blank() {
            continue;
        }
        let len = cell.value.display_text().chars().count();
        let slot = &mut longest[col as usize];
        *slot = (*slot).max(len);
    }

    for (col, len) in longest.into_iter().enumerate() {
        let width = (len as f64 + options.column_padding).min(options.max_column_width);
        sheet.set_column_width(col as u16, width);
    }
}

/// Thin black border on all sides of every non-blank cell
pub fn add_borders(sheet: &mut Worksheet) -> FormatterResult<()> {
    for_each_filled_cell(sheet, 0, |style| style.border = BorderStyle::thin())
}

/// Apply the configured number format to numeric cells below the header
pub fn format_numbers(sheet: &mut Worksheet, options: &FormatOptions) -> FormatterResult<()> {
    let format = options.number_format();
    let targets: Vec<(u32, u16)> = sheet
        .iter_cells()
        .filter(|(row, _, cell)| *row >= 1 && matches!(cell.value, CellValue::Number(_)))
        .map(|(row, col, _)| (row, col))
        .collect();

    for &(row, col) in &targets {
        let format = format.clone();
        sheet.update_cell_style_at(row, col, move |style| style.number_format = format)?;
    }
    tracing::debug!(cells = targets.len(), "applied number format");
    Ok(())
}

/// Center every non-blank cell on both axes
pub fn center_align(sheet: &mut Worksheet) -> FormatterResult<()> {
    for_each_filled_cell(sheet, 0, center)
}

/// Keep row 1 visible while scrolling (split at `A2`)
pub fn freeze_header(sheet: &mut Worksheet) {
    sheet.set_freeze_panes(1, 0);
}

/// Centering and number formatting for the rows under the header, as the full
/// format pipeline applies them
pub(crate) fn style_body(sheet: &mut Worksheet, options: &FormatOptions) -> FormatterResult<()> {
    for_each_filled_cell(sheet, 1, center)?;
    format_numbers(sheet, options)
}

fn center(style: &mut tidy_sheets_core::Style) {
    style.alignment.horizontal = HorizontalAlignment::Center;
    style.alignment.vertical = VerticalAlignment::Center;
}

fn for_each_filled_cell<F>(sheet: &mut Worksheet, first_row: u32, edit: F) -> FormatterResult<()>
where
    F: Fn(&mut tidy_sheets_core::Style),
{
    let targets: Vec<(u32, u16)> = sheet
        .iter_cells()
        .filter(|(row, _, cell)| *row >= first_row && !cell.value.is_blank())
        .map(|(row, col, _)| (row, col))
        .collect();

    for (row, col) in targets {
        sheet.update_cell_style_at(row, col, &edit)?;
    }
    Ok(())
}

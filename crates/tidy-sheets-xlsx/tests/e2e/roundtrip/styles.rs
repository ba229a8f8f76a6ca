//! Cell styles through a write and read.

use crate::{product_workbook, roundtrip};
use pretty_assertions::assert_eq;
use tidy_sheets_core::{
    Alignment, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle, HorizontalAlignment,
    NumberFormat, Style, VerticalAlignment,
};

fn header_style() -> Style {
    Style::new()
        .font(
            FontStyle::default()
                .with_name("Calibri")
                .with_bold(true)
                .with_size(12.0)
                .with_color(Color::WHITE),
        )
        .fill_color(Color::from_hex("4472C4").unwrap())
        .alignment(Alignment::centered())
}

#[test]
fn test_header_style() {
    let mut wb = product_workbook();
    let ws = wb.active_worksheet_mut();
    for col in 0..3 {
        ws.set_cell_style_at(0, col, &header_style()).unwrap();
    }

    let back = roundtrip(&wb);
    let ws = back.worksheet(0).unwrap();
    for col in 0..3 {
        assert_eq!(ws.cell_style_at(0, col), &header_style());
    }
    assert_eq!(ws.cell_style_at(1, 0), &Style::default());
}

#[test]
fn test_borders_alignment_and_number_format() {
    let mut wb = product_workbook();
    let ws = wb.active_worksheet_mut();
    ws.update_cell_style_at(1, 2, |s| {
        s.border = BorderStyle::thin();
        s.alignment = Alignment::centered();
        s.number_format = NumberFormat::thousands_decimal();
    })
    .unwrap();

    let back = roundtrip(&wb);
    let style = back.worksheet(0).unwrap().cell_style_at(1, 2).clone();

    let left = style.border.left.unwrap();
    assert_eq!(left.style, BorderLineStyle::Thin);
    assert_eq!(left.color, Color::BLACK);
    assert_eq!(style.border, BorderStyle::thin());
    assert_eq!(style.alignment.horizontal, HorizontalAlignment::Center);
    assert_eq!(style.alignment.vertical, VerticalAlignment::Center);
    assert_eq!(style.number_format, NumberFormat::BuiltIn(4));
    assert_eq!(style.number_format.format_code(), "#,##0.00");
}

#[test]
fn test_theme_and_pattern_colors() {
    let mut wb = product_workbook();
    let ws = wb.active_worksheet_mut();
    let style = Style::new()
        .font_color(Color::Theme { index: 4, tint: -25 })
        .fill_color(Color::Indexed(22));
    ws.set_cell_style_at(2, 1, &style).unwrap();

    let back = roundtrip(&wb);
    let read = back.worksheet(0).unwrap().cell_style_at(2, 1);
    assert_eq!(read.font.color, Color::Theme { index: 4, tint: -25 });
    assert_eq!(read.fill, FillStyle::solid(Color::Indexed(22)));
}

#[test]
fn test_styles_on_every_sheet() {
    let mut wb = product_workbook();
    wb.add_worksheet_with_name("Итоги").unwrap();
    let bold = Style::new().bold(true);
    wb.worksheet_mut(1)
        .unwrap()
        .set_cell_value("A1", "Всего")
        .unwrap();
    wb.worksheet_mut(1)
        .unwrap()
        .set_cell_style_at(0, 0, &bold)
        .unwrap();

    let back = roundtrip(&wb);
    assert_eq!(back.sheet_count(), 2);
    assert_eq!(back.worksheet(1).unwrap().name(), "Итоги");
    assert_eq!(back.worksheet(1).unwrap().cell_style_at(0, 0), &bold);
}

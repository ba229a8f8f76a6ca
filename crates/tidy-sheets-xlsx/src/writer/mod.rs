//! XLSX writer

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{escape_xml, XlsxStyleTable};
use tidy_sheets_core::{CellAddress, CellValue, Workbook, Worksheet};

const SPREADSHEETML_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const RELATIONSHIPS_NS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// XLSX file writer
pub struct XlsxWriter;

impl XlsxWriter {
    /// Write a workbook to a file path
    pub fn write_file<P: AsRef<Path>>(workbook: &Workbook, path: P) -> XlsxResult<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write(workbook, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &Workbook, writer: W) -> XlsxResult<()> {
        if workbook.is_empty() {
            return Err(XlsxError::InvalidFormat(
                "a workbook needs at least one sheet".into(),
            ));
        }

        let mut zip = zip::ZipWriter::new(writer);
        let style_table = XlsxStyleTable::build(workbook);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_part(&mut zip, "xl/styles.xml", &style_table.to_styles_xml())?;

        for (i, sheet) in workbook.worksheets().enumerate() {
            let selected = i == workbook.active_sheet();
            let xml = Self::worksheet_xml(sheet, i, selected, &style_table);
            Self::write_part(&mut zip, &format!("xl/worksheets/sheet{}.xml", i + 1), &xml)?;
        }

        zip.finish()?;
        log::debug!("wrote {} sheets", workbook.sheet_count());
        Ok(())
    }

    fn write_part<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        name: &str,
        content: &str,
    ) -> XlsxResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(name, options)?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");
        Self::write_part(zip, "[Content_Types].xml", &content)
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> XlsxResult<()> {
        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;
        Self::write_part(zip, "_rels/.rels", content)
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="{}" xmlns:r="{}">
    <bookViews>
        <workbookView activeTab="{}"/>
    </bookViews>
    <sheets>"#,
            SPREADSHEETML_NS,
            RELATIONSHIPS_NS,
            workbook.active_sheet()
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            let state = if sheet.is_visible() {
                ""
            } else {
                r#" state="hidden""#
            };
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}"{} r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                state,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        Self::write_part(zip, "xl/workbook.xml", &content)
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &Workbook,
    ) -> XlsxResult<()> {
        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>
</Relationships>"#,
            styles_rid
        ));

        Self::write_part(zip, "xl/_rels/workbook.xml.rels", &content)
    }

    /// Worksheet part. Element order follows the CT_Worksheet schema:
    /// dimension, sheetViews, sheetFormatPr, cols, sheetData, mergeCells.
    fn worksheet_xml(
        sheet: &Worksheet,
        index: usize,
        selected: bool,
        style_table: &XlsxStyleTable,
    ) -> String {
        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="{}">"#,
            SPREADSHEETML_NS
        );

        let dimension = sheet
            .used_range()
            .map_or_else(|| "A1".to_string(), |r| r.to_a1_string());
        content.push_str(&format!("\n    <dimension ref=\"{}\"/>", dimension));

        Self::push_sheet_views(&mut content, sheet, selected);

        content.push_str("\n    <sheetFormatPr defaultRowHeight=\"15\"/>");

        Self::push_cols(&mut content, sheet);

        // Rows with cells, plus rows that only carry a height or are hidden
        let mut rows: BTreeSet<u32> = sheet.row_indices().collect();
        rows.extend(sheet.custom_row_heights().keys().copied());
        rows.extend(sheet.hidden_rows().iter().copied());

        if rows.is_empty() {
            content.push_str("\n    <sheetData/>");
        } else {
            content.push_str("\n    <sheetData>");
            for row in rows {
                let mut row_attrs = String::new();
                if let Some(height) = sheet.custom_row_heights().get(&row) {
                    row_attrs.push_str(&format!(" ht=\"{}\" customHeight=\"1\"", height));
                }
                if sheet.is_row_hidden(row) {
                    row_attrs.push_str(" hidden=\"1\"");
                }

                content.push_str(&format!("\n        <row r=\"{}\"{}>", row + 1, row_attrs));
                for (col, cell) in sheet.iter_row(row) {
                    let cell_ref = CellAddress::new(row, col).to_a1_string();
                    let xf_id = style_table.xf_id_for(index, cell.style_index);
                    Self::push_cell(&mut content, &cell_ref, xf_id, &cell.value);
                }
                content.push_str("\n        </row>");
            }
            content.push_str("\n    </sheetData>");
        }

        let merged_regions = sheet.merged_regions();
        if !merged_regions.is_empty() {
            content.push_str(&format!(
                "\n    <mergeCells count=\"{}\">",
                merged_regions.len()
            ));
            for range in merged_regions {
                content.push_str(&format!(
                    "\n        <mergeCell ref=\"{}\"/>",
                    range.to_a1_string()
                ));
            }
            content.push_str("\n    </mergeCells>");
        }

        content.push_str("\n</worksheet>");
        content
    }

    fn push_sheet_views(content: &mut String, sheet: &Worksheet, selected: bool) {
        let tab_selected = if selected { " tabSelected=\"1\"" } else { "" };
        let panes = match sheet.freeze_panes() {
            Some(panes) => panes,
            None => {
                content.push_str(&format!(
                    "\n    <sheetViews>\n        <sheetView{} workbookViewId=\"0\"/>\n    </sheetViews>",
                    tab_selected
                ));
                return;
            }
        };

        let active_pane = match (panes.row > 0, panes.col > 0) {
            (true, true) => "bottomRight",
            (true, false) => "bottomLeft",
            _ => "topRight",
        };
        let mut split = String::new();
        if panes.col > 0 {
            split.push_str(&format!(" xSplit=\"{}\"", panes.col));
        }
        if panes.row > 0 {
            split.push_str(&format!(" ySplit=\"{}\"", panes.row));
        }
        let top_left = panes.top_left_cell().to_a1_string();

        content.push_str(&format!(
            r#"
    <sheetViews>
        <sheetView{} workbookViewId="0">
            <pane{} topLeftCell="{}" activePane="{}" state="frozen"/>
            <selection pane="{}" activeCell="{}" sqref="{}"/>
        </sheetView>
    </sheetViews>"#,
            tab_selected, split, top_left, active_pane, active_pane, top_left, top_left
        ));
    }

    fn push_cols(content: &mut String, sheet: &Worksheet) {
        let mut cols: BTreeSet<u16> = sheet.custom_column_widths().keys().copied().collect();
        cols.extend(sheet.hidden_columns().iter().copied());
        if cols.is_empty() {
            return;
        }

        content.push_str("\n    <cols>");
        for col in cols {
            let custom = if sheet.custom_column_widths().contains_key(&col) {
                " customWidth=\"1\""
            } else {
                ""
            };
            let hidden = if sheet.is_column_hidden(col) {
                " hidden=\"1\""
            } else {
                ""
            };
            content.push_str(&format!(
                "\n        <col min=\"{n}\" max=\"{n}\" width=\"{}\"{}{}/>",
                sheet.column_width(col),
                custom,
                hidden,
                n = col + 1
            ));
        }
        content.push_str("\n    </cols>");
    }

    fn push_cell(content: &mut String, cell_ref: &str, xf_id: u32, value: &CellValue) {
        let style_attr = if xf_id != 0 {
            format!(" s=\"{}\"", xf_id)
        } else {
            String::new()
        };

        match value {
            CellValue::Empty => {
                // Style-only cells keep their formatting
                if xf_id != 0 {
                    content.push_str(&format!("\n            <c r=\"{}\"{}/>", cell_ref, style_attr));
                }
            }
            CellValue::Formula { text, cached_value } => {
                let formula = text.strip_prefix('=').unwrap_or(text);
                let (type_attr, cached) = match cached_value.as_deref() {
                    Some(v) => Self::typed_value(v),
                    None => ("", None),
                };
                let cached = cached.map_or(String::new(), |v| format!("<v>{}</v>", v));
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{}{}><f>{}</f>{}</c>",
                    cell_ref,
                    style_attr,
                    type_attr,
                    escape_xml(formula),
                    cached
                ));
            }
            CellValue::String(s) => {
                let space = if s.as_str().trim() != s.as_str() {
                    " xml:space=\"preserve\""
                } else {
                    ""
                };
                content.push_str(&format!(
                    "\n            <c r=\"{}\"{} t=\"inlineStr\"><is><t{}>{}</t></is></c>",
                    cell_ref,
                    style_attr,
                    space,
                    escape_xml(s.as_str())
                ));
            }
            other => {
                let (type_attr, v) = Self::typed_value(other);
                if let Some(v) = v {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{}{}><v>{}</v></c>",
                        cell_ref, style_attr, type_attr, v
                    ));
                }
            }
        }
    }

    /// The `t` attribute and `<v>` text for a plain value
    fn typed_value(value: &CellValue) -> (&'static str, Option<String>) {
        match value {
            CellValue::Number(n) | CellValue::DateTime(n) if n.is_finite() => {
                ("", Some(n.to_string()))
            }
            CellValue::Number(_) | CellValue::DateTime(_) => (" t=\"e\"", Some("#NUM!".into())),
            CellValue::Boolean(b) => {
                let v = if *b { "1" } else { "0" };
                (" t=\"b\"", Some(v.to_string()))
            }
            CellValue::Error(e) => (" t=\"e\"", Some(escape_xml(e.as_str()))),
            CellValue::String(s) => (" t=\"str\"", Some(escape_xml(s.as_str()))),
            CellValue::Empty | CellValue::Formula { .. } => ("", None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidy_sheets_core::{CellRange, Style};

    fn sheet_xml(sheet: Worksheet) -> String {
        let mut wb = Workbook::empty();
        wb.add_existing_worksheet(sheet).unwrap();
        let table = XlsxStyleTable::build(&wb);
        XlsxWriter::worksheet_xml(wb.worksheet(0).unwrap(), 0, true, &table)
    }

    #[test]
    fn test_frozen_header_pane() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("A1", "ID").unwrap();
        ws.set_freeze_panes(1, 0);

        let xml = sheet_xml(ws);
        assert!(xml.contains(
            r#"<pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/>"#
        ));
        assert!(xml.contains("tabSelected=\"1\""));
    }

    #[test]
    fn test_cols_and_row_attributes() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("B3", 1.5).unwrap();
        ws.set_column_width(1, 9.0);
        ws.set_column_hidden(4, true);
        ws.set_row_height(0, 30.0);
        ws.set_row_hidden(5, true);

        let xml = sheet_xml(ws);
        assert!(xml.contains(r#"<col min="2" max="2" width="9" customWidth="1"/>"#));
        assert!(xml.contains(r#"<col min="5" max="5" width="8.43" hidden="1"/>"#));
        assert!(xml.contains(r#"<row r="1" ht="30" customHeight="1">"#));
        assert!(xml.contains(r#"<row r="6" hidden="1">"#));
        assert!(xml.contains(r#"<c r="B3"><v>1.5</v></c>"#));
        assert!(xml.contains(r#"<dimension ref="B3"/>"#));
    }

    #[test]
    fn test_cell_values() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("A1", " padded <b> ").unwrap();
        ws.set_cell_value("B1", true).unwrap();
        ws.set_cell_value("C1", CellValue::DateTime(45352.5)).unwrap();
        ws.set_cell_value(
            "D1",
            CellValue::Formula {
                text: "=A1&\"x\"".into(),
                cached_value: Some(Box::new(CellValue::string("done"))),
            },
        )
        .unwrap();
        ws.set_cell_value("E1", f64::NAN).unwrap();

        let xml = sheet_xml(ws);
        assert!(xml.contains(
            r#"<c r="A1" t="inlineStr"><is><t xml:space="preserve"> padded &lt;b&gt; </t></is></c>"#
        ));
        assert!(xml.contains(r#"<c r="B1" t="b"><v>1</v></c>"#));
        assert!(xml.contains(r#"<c r="C1"><v>45352.5</v></c>"#));
        assert!(xml.contains(r#"<c r="D1" t="str"><f>A1&amp;&quot;x&quot;</f><v>done</v></c>"#));
        assert!(xml.contains(r#"<c r="E1" t="e"><v>#NUM!</v></c>"#));
    }

    #[test]
    fn test_merged_cells() {
        let mut ws = Worksheet::new("Data");
        ws.set_cell_value("A1", "Title").unwrap();
        ws.merge_cells(&CellRange::parse("A1:C1").unwrap()).unwrap();

        let xml = sheet_xml(ws);
        assert!(xml.contains(r#"<mergeCells count="1">"#));
        assert!(xml.contains(r#"<mergeCell ref="A1:C1"/>"#));
    }

    #[test]
    fn test_style_only_cell_is_kept() {
        let mut wb = Workbook::new();
        let ws = wb.active_worksheet_mut();
        ws.set_cell_style_at(0, 0, &Style::new().bold(true)).unwrap();

        let table = XlsxStyleTable::build(&wb);
        let xml = XlsxWriter::worksheet_xml(wb.worksheet(0).unwrap(), 0, true, &table);
        assert!(xml.contains(r#"<c r="A1" s="1"/>"#));
    }

    #[test]
    fn test_empty_workbook_is_rejected() {
        let mut buf = std::io::Cursor::new(Vec::new());
        let result = XlsxWriter::write(&Workbook::empty(), &mut buf);
        assert!(matches!(result, Err(XlsxError::InvalidFormat(_))));
    }
}

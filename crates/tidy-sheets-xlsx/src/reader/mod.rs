//! XLSX reader

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use chrono::NaiveDateTime;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use crate::styles::{attr_parse, attr_string, read_styles_xml};
use tidy_sheets_core::style::Style;
use tidy_sheets_core::{CellAddress, CellData, CellError, CellRange, CellValue, Workbook, Worksheet};

/// Decode Excel's `_xHHHH_` escape sequences in strings.
///
/// Excel uses this format to encode characters XML cannot carry:
/// - `_x000d_` = CR (carriage return)
/// - `_x000a_` = LF (line feed)
/// - `_x0009_` = Tab
/// - `_x005f_` = Underscore (escaped underscore)
fn decode_excel_escapes(s: &str) -> String {
    if !s.contains("_x") {
        return s.to_string();
    }

    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '_' {
            result.push(c);
            continue;
        }

        let mut consumed_x = false;
        let mut hex_chars = String::new();

        if chars.peek() == Some(&'x') {
            chars.next();
            consumed_x = true;

            while hex_chars.len() < 4 {
                match chars.peek() {
                    Some(&ch) if ch.is_ascii_hexdigit() => {
                        hex_chars.push(ch);
                        chars.next();
                    }
                    _ => break,
                }
            }

            if hex_chars.len() == 4 && chars.peek() == Some(&'_') {
                let decoded = u32::from_str_radix(&hex_chars, 16)
                    .ok()
                    .and_then(char::from_u32);
                if let Some(ch) = decoded {
                    chars.next();
                    result.push(ch);
                    continue;
                }
            }
        }

        // Not an escape; put back what was consumed
        result.push('_');
        if consumed_x {
            result.push('x');
            result.push_str(&hex_chars);
        }
    }

    result
}

/// Sheet entry from `xl/workbook.xml`
#[derive(Debug)]
struct SheetEntry {
    name: String,
    r_id: String,
    hidden: bool,
}

#[derive(Debug, Default)]
struct WorkbookInfo {
    sheets: Vec<SheetEntry>,
    active_tab: usize,
}

/// Shared lookups used while reading one worksheet
struct SheetContext<'a> {
    shared_strings: &'a [String],
    styles: &'a [Style],
    /// Global xf id -> index in the worksheet's own style pool
    local_styles: HashMap<u32, u32>,
}

impl SheetContext<'_> {
    /// Intern the style behind `xf_id` into the sheet's pool
    fn local_style(&mut self, worksheet: &mut Worksheet, xf_id: u32) -> XlsxResult<(u32, &Style)> {
        let styles = self.styles;
        let style = styles
            .get(xf_id as usize)
            .ok_or_else(|| XlsxError::Parse(format!("Style index {} out of bounds", xf_id)))?;
        let local = match self.local_styles.get(&xf_id) {
            Some(&local) => local,
            None => {
                let local = worksheet.intern_style(style.clone());
                self.local_styles.insert(xf_id, local);
                local
            }
        };
        Ok((local, style))
    }
}

/// Raw pieces of one `<c>` element
#[derive(Debug, Default)]
struct RawCell {
    reference: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

impl RawCell {
    fn from_attrs(e: &BytesStart<'_>) -> Self {
        Self {
            reference: attr_string(e, b"r"),
            cell_type: attr_string(e, b"t"),
            style: attr_parse(e, b"s"),
            ..Self::default()
        }
    }
}

/// XLSX file reader
pub struct XlsxReader;

impl XlsxReader {
    /// Read a workbook from a file path
    pub fn read_file<P: AsRef<Path>>(path: P) -> XlsxResult<Workbook> {
        let file = File::open(path)?;
        Self::read(file)
    }

    /// Read a workbook from a reader
    pub fn read<R: Read + Seek>(reader: R) -> XlsxResult<Workbook> {
        let mut archive = zip::ZipArchive::new(reader)?;

        if archive.by_name("[Content_Types].xml").is_err() {
            return Err(XlsxError::InvalidFormat(
                "Missing [Content_Types].xml".into(),
            ));
        }

        let shared_strings = Self::read_shared_strings(&mut archive)?;
        let styles = Self::read_styles(&mut archive)?;
        let info = Self::read_workbook_xml(&mut archive)?;
        let sheet_paths = Self::read_workbook_rels(&mut archive)?;

        let mut workbook = Workbook::empty();

        for entry in &info.sheets {
            let path = match sheet_paths.get(&entry.r_id) {
                Some(path) => path,
                None => {
                    log::warn!(
                        "sheet '{}' has no worksheet relationship ({}), skipping",
                        entry.name,
                        entry.r_id
                    );
                    continue;
                }
            };

            let mut worksheet = Worksheet::new(entry.name.as_str());
            worksheet.set_visible(!entry.hidden);
            let mut ctx = SheetContext {
                shared_strings: &shared_strings,
                styles: &styles,
                local_styles: HashMap::new(),
            };
            Self::read_worksheet(&mut archive, path, &mut worksheet, &mut ctx)?;
            log::debug!(
                "read sheet '{}': {} cells from {}",
                entry.name,
                worksheet.cell_count(),
                path
            );
            workbook.add_existing_worksheet(worksheet)?;
        }

        if workbook.is_empty() {
            workbook.add_worksheet_with_name("Sheet1")?;
        }

        if info.active_tab < workbook.sheet_count() {
            workbook.set_active_sheet(info.active_tab)?;
        } else {
            log::warn!(
                "activeTab {} out of range for {} sheets, using the first",
                info.active_tab,
                workbook.sheet_count()
            );
        }

        Ok(workbook)
    }

    /// Read the shared strings table
    fn read_shared_strings<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<Vec<String>> {
        let mut strings = Vec::new();

        let file = match archive.by_name("xl/sharedStrings.xml") {
            Ok(f) => f,
            Err(_) => return Ok(strings),
        };

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();
        let mut current_string = String::new();
        let mut in_si = false;
        let mut in_t = false;
        // Phonetic runs repeat the text in another script; skip them
        let mut in_phonetic = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"si" => {
                        in_si = true;
                        current_string.clear();
                    }
                    b"rPh" => in_phonetic = true,
                    b"t" if in_si && !in_phonetic => in_t = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) if e.name().as_ref() == b"si" => {
                    strings.push(String::new());
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"si" => {
                        strings.push(decode_excel_escapes(&current_string));
                        current_string.clear();
                        in_si = false;
                    }
                    b"rPh" => in_phonetic = false,
                    b"t" => in_t = false,
                    _ => {}
                },
                Ok(Event::Text(e)) if in_t => {
                    if let Ok(text) = e.unescape() {
                        current_string.push_str(&text);
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(strings)
    }

    fn read_styles<R: Read + Seek>(archive: &mut zip::ZipArchive<R>) -> XlsxResult<Vec<Style>> {
        match archive.by_name("xl/styles.xml") {
            Ok(file) => read_styles_xml(file),
            Err(_) => Ok(vec![Style::default()]),
        }
    }

    /// Read workbook.xml for sheet names, rIds, visibility and the active tab
    fn read_workbook_xml<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<WorkbookInfo> {
        let file = archive
            .by_name("xl/workbook.xml")
            .map_err(|_| XlsxError::MissingPart("xl/workbook.xml".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut info = WorkbookInfo::default();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"sheet" => {
                        let name = attr_string(&e, b"name");
                        let r_id = attr_string(&e, b"r:id");
                        let hidden = matches!(
                            attr_string(&e, b"state").as_deref(),
                            Some("hidden") | Some("veryHidden")
                        );
                        if let (Some(name), Some(r_id)) = (name, r_id) {
                            info.sheets.push(SheetEntry { name, r_id, hidden });
                        }
                    }
                    b"workbookView" => {
                        info.active_tab = attr_parse(&e, b"activeTab").unwrap_or(0);
                    }
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(info)
    }

    /// Read workbook.xml.rels to get sheet file paths
    fn read_workbook_rels<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
    ) -> XlsxResult<HashMap<String, String>> {
        let file = archive
            .by_name("xl/_rels/workbook.xml.rels")
            .map_err(|_| XlsxError::MissingPart("xl/_rels/workbook.xml.rels".into()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(true);

        let mut buf = Vec::new();
        let mut rels = HashMap::new();

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Empty(e)) | Ok(Event::Start(e))
                    if e.name().as_ref() == b"Relationship" =>
                {
                    let id = attr_string(&e, b"Id");
                    let target = attr_string(&e, b"Target");
                    let rel_type = attr_string(&e, b"Type");

                    if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type) {
                        if rel_type.ends_with("/worksheet") {
                            // Targets are relative to xl/ unless absolute
                            let full_path = match target.strip_prefix('/') {
                                Some(absolute) => absolute.to_string(),
                                None => format!("xl/{}", target),
                            };
                            rels.insert(id, full_path);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(rels)
    }

    /// Read a worksheet part into `worksheet`
    fn read_worksheet<R: Read + Seek>(
        archive: &mut zip::ZipArchive<R>,
        path: &str,
        worksheet: &mut Worksheet,
        ctx: &mut SheetContext<'_>,
    ) -> XlsxResult<()> {
        let file = archive
            .by_name(path)
            .map_err(|_| XlsxError::MissingPart(path.to_string()))?;

        let mut xml_reader = Reader::from_reader(BufReader::new(file));
        xml_reader.trim_text(false);

        let mut buf = Vec::new();

        let mut cell: Option<RawCell> = None;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => Self::apply_row_attrs(&e, worksheet),
                    b"c" => cell = Some(RawCell::from_attrs(&e)),
                    b"v" if cell.is_some() => in_value = true,
                    b"f" if cell.is_some() => in_formula = true,
                    b"is" if cell.is_some() => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    _ => {}
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => Self::apply_row_attrs(&e, worksheet),
                    b"col" => Self::apply_col_attrs(&e, worksheet),
                    b"c" => {
                        // Empty cell element; may still carry a style
                        Self::process_cell(worksheet, RawCell::from_attrs(&e), ctx)?;
                    }
                    b"pane" => Self::apply_pane(&e, worksheet),
                    b"mergeCell" => Self::apply_merge(&e, worksheet),
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if let Some(raw) = cell.as_mut() {
                        let text = e.unescape().map_err(XlsxError::Xml)?;
                        if in_value {
                            raw.value.get_or_insert_with(String::new).push_str(&text);
                        } else if in_formula {
                            raw.formula.get_or_insert_with(String::new).push_str(&text);
                        } else if in_inline_text {
                            raw.inline.get_or_insert_with(String::new).push_str(&text);
                        }
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        if let Some(raw) = cell.take() {
                            Self::process_cell(worksheet, raw, ctx)?;
                        }
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"t" => in_inline_text = false,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XlsxError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Row dimensions: ht, customHeight, hidden
    fn apply_row_attrs(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let row = match attr_parse::<u32>(e, b"r") {
            Some(r) if r > 0 => r - 1,
            _ => return,
        };
        if is_true(attr_string(e, b"customHeight")) {
            if let Some(h) = attr_parse::<f64>(e, b"ht") {
                worksheet.set_row_height(row, h);
            }
        }
        if is_true(attr_string(e, b"hidden")) {
            worksheet.set_row_hidden(row, true);
        }
    }

    /// Column dimensions: min, max, width, customWidth, hidden
    fn apply_col_attrs(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let (min, max) = match (attr_parse::<u16>(e, b"min"), attr_parse::<u16>(e, b"max")) {
            (Some(min), Some(max)) if min > 0 && min <= max => (min, max),
            _ => return,
        };
        let width = attr_parse::<f64>(e, b"width");
        let custom_width = is_true(attr_string(e, b"customWidth"));
        let hidden = is_true(attr_string(e, b"hidden"));

        // min/max are 1-based
        for col in (min - 1)..max {
            if custom_width {
                if let Some(w) = width {
                    worksheet.set_column_width(col, w);
                }
            }
            if hidden {
                worksheet.set_column_hidden(col, true);
            }
        }
    }

    /// `<pane>` inside `<sheetView>`; only frozen panes are kept
    fn apply_pane(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let state = attr_string(e, b"state");
        if !matches!(state.as_deref(), Some("frozen") | Some("frozenSplit")) {
            return;
        }
        // Frozen splits count whole rows/columns, but some writers emit "1.0"
        let rows = attr_parse::<f64>(e, b"ySplit").unwrap_or(0.0).max(0.0) as u32;
        let cols = attr_parse::<f64>(e, b"xSplit").unwrap_or(0.0).max(0.0) as u16;
        worksheet.set_freeze_panes(rows, cols);
    }

    fn apply_merge(e: &BytesStart<'_>, worksheet: &mut Worksheet) {
        let reference = match attr_string(e, b"ref") {
            Some(r) => r,
            None => return,
        };
        let merged = CellRange::parse(&reference).and_then(|range| worksheet.merge_cells(&range));
        if let Err(err) = merged {
            log::warn!("ignoring merged region '{}': {}", reference, err);
        }
    }

    /// Turn a raw `<c>` into a stored cell
    fn process_cell(
        worksheet: &mut Worksheet,
        raw: RawCell,
        ctx: &mut SheetContext<'_>,
    ) -> XlsxResult<()> {
        let cell_ref = match raw.reference.as_deref() {
            Some(r) => r,
            None => {
                log::warn!("cell without a reference in '{}', skipping", worksheet.name());
                return Ok(());
            }
        };
        let addr = CellAddress::parse(cell_ref).map_err(|e| {
            XlsxError::Parse(format!("Invalid cell reference '{}': {}", cell_ref, e))
        })?;

        let cell_type = raw.cell_type.as_deref();
        let mut value = match raw.formula.as_deref() {
            Some(f) if !f.is_empty() => {
                let cached = raw
                    .value
                    .as_deref()
                    .and_then(|v| parse_typed_value(cell_type, v, ctx.shared_strings).ok());
                let text = if f.starts_with('=') {
                    f.to_string()
                } else {
                    format!("={}", f)
                };
                CellValue::Formula {
                    text,
                    cached_value: cached.map(Box::new),
                }
            }
            _ => match (&raw.inline, &raw.value) {
                (Some(inline), _) => CellValue::String(decode_excel_escapes(inline).into()),
                (None, Some(v)) => parse_typed_value(cell_type, v, ctx.shared_strings)?,
                (None, None) => CellValue::Empty,
            },
        };

        let style_index = match raw.style {
            Some(xf) if xf != 0 => {
                let (local, style) = ctx.local_style(worksheet, xf)?;
                if style.number_format.is_date_format() {
                    value = promote_date(value);
                }
                local
            }
            _ => 0,
        };

        if value.is_empty() && style_index == 0 {
            return Ok(());
        }
        worksheet.put_cell(addr.row, addr.col, CellData::with_style(value, style_index))?;
        Ok(())
    }
}

/// Interpret a `<v>` according to the cell's `t` attribute
fn parse_typed_value(
    cell_type: Option<&str>,
    value: &str,
    shared_strings: &[String],
) -> XlsxResult<CellValue> {
    Ok(match cell_type {
        Some("s") => {
            let idx: usize = value.trim().parse().map_err(|_| {
                XlsxError::Parse(format!("Invalid shared string index: {}", value))
            })?;
            let s = shared_strings.get(idx).ok_or_else(|| {
                XlsxError::Parse(format!("Shared string index {} out of bounds", idx))
            })?;
            CellValue::String(s.as_str().into())
        }
        Some("b") => CellValue::Boolean(value == "1" || value.eq_ignore_ascii_case("true")),
        Some("e") => value
            .parse::<CellError>()
            .map(CellValue::Error)
            .unwrap_or_else(|_| CellValue::string(value)),
        Some("str") | Some("inlineStr") => CellValue::String(decode_excel_escapes(value).into()),
        // ISO 8601 date cells
        Some("d") => match parse_iso_datetime(value) {
            Some(dt) => CellValue::date_time(dt),
            None => CellValue::string(value),
        },
        None | Some("n") => match value.trim().parse::<f64>() {
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::string(value),
        },
        Some(other) => {
            log::debug!("unknown cell type '{}', reading as text", other);
            CellValue::string(value)
        }
    })
}

fn parse_iso_datetime(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().trim_end_matches('Z');
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Numbers under a date format are date-times; formula results follow the same rule
fn promote_date(value: CellValue) -> CellValue {
    match value {
        CellValue::Number(n) => CellValue::DateTime(n),
        CellValue::Formula {
            text,
            cached_value: Some(cached),
        } => CellValue::Formula {
            text,
            cached_value: Some(Box::new(promote_date(*cached))),
        },
        other => other,
    }
}

fn is_true(value: Option<String>) -> bool {
    matches!(value.as_deref(), Some("1") | Some("true"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    #[test]
    fn test_decode_excel_escapes_control_chars() {
        assert_eq!(decode_excel_escapes("hello_x000d_world"), "hello\rworld");
        assert_eq!(decode_excel_escapes("hello_x000a_world"), "hello\nworld");
        assert_eq!(decode_excel_escapes("col1_x0009_col2"), "col1\tcol2");
        assert_eq!(
            decode_excel_escapes("line1_x000d__x000a_line2"),
            "line1\r\nline2"
        );
    }

    #[test]
    fn test_decode_excel_escapes_underscore() {
        assert_eq!(decode_excel_escapes("under_x005f_score"), "under_score");
        assert_eq!(decode_excel_escapes("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn test_decode_excel_escapes_partial_sequence() {
        assert_eq!(decode_excel_escapes("_x00"), "_x00");
        assert_eq!(decode_excel_escapes("_x000"), "_x000");
        assert_eq!(decode_excel_escapes("_x000d"), "_x000d");
        assert_eq!(decode_excel_escapes("_xyz"), "_xyz");
    }

    #[test]
    fn test_decode_excel_escapes_uppercase() {
        assert_eq!(decode_excel_escapes("_x000D_"), "\r");
        assert_eq!(decode_excel_escapes("Цена_x000A_руб."), "Цена\nруб.");
    }

    #[test]
    fn test_parse_typed_value() {
        let strings = vec!["Товар".to_string()];
        assert_eq!(
            parse_typed_value(Some("s"), "0", &strings).unwrap(),
            CellValue::string("Товар")
        );
        assert!(parse_typed_value(Some("s"), "3", &strings).is_err());
        assert_eq!(
            parse_typed_value(None, "12.5", &strings).unwrap(),
            CellValue::Number(12.5)
        );
        assert_eq!(
            parse_typed_value(Some("b"), "1", &strings).unwrap(),
            CellValue::Boolean(true)
        );
        assert_eq!(
            parse_typed_value(Some("e"), "#DIV/0!", &strings).unwrap(),
            CellValue::Error(CellError::Div0)
        );
        assert!(matches!(
            parse_typed_value(Some("d"), "2024-03-01T12:30:00", &strings).unwrap(),
            CellValue::DateTime(_)
        ));
    }

    fn minimal_package(sheet_xml: &str, styles_xml: Option<&str>) -> Vec<u8> {
        let mut buf = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buf));
            let options = zip::write::SimpleFileOptions::default();

            zip.start_file("[Content_Types].xml", options).unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="xml" ContentType="application/xml"/><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/></Types>"#).unwrap();

            zip.start_file("_rels/.rels", options).unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#).unwrap();

            zip.start_file("xl/workbook.xml", options).unwrap();
            zip.write_all(br#"<?xml version="1.0"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#).unwrap();

            zip.start_file("xl/_rels/workbook.xml.rels", options)
                .unwrap();
            zip.write_all(br#"<?xml version="1.0"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#).unwrap();

            if let Some(styles) = styles_xml {
                zip.start_file("xl/styles.xml", options).unwrap();
                zip.write_all(styles.as_bytes()).unwrap();
            }

            zip.start_file("xl/worksheets/sheet1.xml", options).unwrap();
            zip.write_all(sheet_xml.as_bytes()).unwrap();

            zip.finish().unwrap();
        }
        buf
    }

    #[test]
    fn test_read_empty_xlsx() {
        let bytes = minimal_package(
            r#"<?xml version="1.0"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData></sheetData></worksheet>"#,
            None,
        );
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();

        assert_eq!(workbook.sheet_count(), 1);
        assert_eq!(workbook.worksheet(0).unwrap().name(), "Sheet1");
        assert!(workbook.worksheet(0).unwrap().is_empty());
    }

    #[test]
    fn test_read_frozen_pane_and_date_cell() {
        let styles = r#"<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts>
<fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills>
<borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders>
<cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/><xf numFmtId="14" fontId="0" fillId="0" borderId="0" applyNumberFormat="1"/></cellXfs>
</styleSheet>"#;
        let sheet = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
<sheetViews><sheetView workbookViewId="0"><pane ySplit="1" topLeftCell="A2" activePane="bottomLeft" state="frozen"/></sheetView></sheetViews>
<cols><col min="1" max="2" width="20" customWidth="1"/></cols>
<sheetData>
<row r="1"><c r="A1" t="inlineStr"><is><t>Дата</t></is></c><c r="B1" t="inlineStr"><is><r><t>Sum </t></r><r><t>total</t></r></is></c></row>
<row r="2" ht="30" customHeight="1"><c r="A2" s="1"><v>45352</v></c><c r="B2"><f>SUM(1,2)</f><v>3</v></c></row>
</sheetData>
<mergeCells count="1"><mergeCell ref="C1:D1"/></mergeCells>
</worksheet>"#;

        let bytes = minimal_package(sheet, Some(styles));
        let workbook = XlsxReader::read(Cursor::new(bytes)).unwrap();
        let ws = workbook.worksheet(0).unwrap();

        assert_eq!(ws.freeze_panes().map(|p| (p.row, p.col)), Some((1, 0)));
        assert_eq!(ws.column_width(0), 20.0);
        assert_eq!(ws.column_width(1), 20.0);
        assert_eq!(ws.row_height(1), 30.0);
        assert_eq!(ws.merged_regions().len(), 1);

        assert_eq!(ws.value_at(0, 0), &CellValue::string("Дата"));
        assert_eq!(ws.value_at(0, 1), &CellValue::string("Sum total"));
        assert_eq!(ws.value_at(1, 0), &CellValue::DateTime(45352.0));
        assert_eq!(
            ws.value_at(1, 1),
            &CellValue::Formula {
                text: "=SUM(1,2)".into(),
                cached_value: Some(Box::new(CellValue::Number(3.0))),
            }
        );
    }

    #[test]
    fn test_not_a_zip() {
        let result = XlsxReader::read(Cursor::new(b"ID,Name\n1,X\n".to_vec()));
        assert!(matches!(result, Err(XlsxError::Zip(_))));
    }
}

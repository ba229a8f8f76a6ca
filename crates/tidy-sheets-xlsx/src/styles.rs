//! XLSX styles (styles.xml) read/write helpers

use std::collections::HashMap;
use std::io::{BufReader, Read};

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::{XlsxError, XlsxResult};
use tidy_sheets_core::style::{
    Alignment, BorderEdge, BorderLineStyle, BorderStyle, Color, FillStyle, FontStyle,
    HorizontalAlignment, NumberFormat, PatternType, Style, VerticalAlignment,
};
use tidy_sheets_core::Workbook;

/// First id available for custom number formats; lower ids are built-in
const FIRST_CUSTOM_NUMFMT_ID: u32 = 164;

/// `indexed="64"` is the system foreground color, which is what `Color::Auto` means
const SYSTEM_FOREGROUND_INDEX: u8 = 64;

// === Writing ===

#[derive(Debug)]
pub(crate) struct XlsxStyleTable {
    /// Global, deduplicated styles. Index is the cellXfs index written in `s="..."`.
    styles: Vec<Style>,
    /// Per-worksheet mapping: local style pool index -> global xf id
    sheet_maps: Vec<HashMap<u32, u32>>,
}

#[derive(Debug, Clone, Copy)]
struct ResolvedXfIds {
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    num_fmt_id: u32,
}

impl XlsxStyleTable {
    pub(crate) fn build(workbook: &Workbook) -> Self {
        let mut styles: Vec<Style> = Vec::new();
        let mut style_to_xf: HashMap<Style, u32> = HashMap::new();

        let default = Style::default();
        styles.push(default.clone());
        style_to_xf.insert(default, 0);

        let mut sheet_maps: Vec<HashMap<u32, u32>> = Vec::with_capacity(workbook.sheet_count());

        for sheet in workbook.worksheets() {
            let mut map: HashMap<u32, u32> = HashMap::new();
            map.insert(0, 0);

            for (_row, _col, cell) in sheet.iter_cells() {
                let local_idx = cell.style_index;
                if map.contains_key(&local_idx) {
                    continue;
                }

                let style = sheet
                    .style_pool()
                    .get(local_idx)
                    .cloned()
                    .unwrap_or_default();

                let xf_id = match style_to_xf.get(&style) {
                    Some(&id) => id,
                    None => {
                        let id = styles.len() as u32;
                        styles.push(style.clone());
                        style_to_xf.insert(style, id);
                        id
                    }
                };

                map.insert(local_idx, xf_id);
            }

            sheet_maps.push(map);
        }

        log::debug!(
            "style table: {} distinct cell formats across {} sheets",
            styles.len(),
            sheet_maps.len()
        );

        Self { styles, sheet_maps }
    }

    pub(crate) fn xf_id_for(&self, sheet_index: usize, local_style_index: u32) -> u32 {
        self.sheet_maps
            .get(sheet_index)
            .and_then(|m| m.get(&local_style_index).copied())
            .unwrap_or(0)
    }

    pub(crate) fn to_styles_xml(&self) -> String {
        let mut font_ids: HashMap<FontStyle, u32> = HashMap::new();
        let mut fonts: Vec<FontStyle> = vec![FontStyle::default()];
        font_ids.insert(FontStyle::default(), 0);

        // Excel requires the first two fills to be none and gray125
        let mut fill_ids: HashMap<FillStyle, u32> = HashMap::new();
        let mut fills: Vec<FillStyle> = vec![
            FillStyle::None,
            FillStyle::Pattern {
                pattern: PatternType::Gray125,
                foreground: Color::Auto,
                background: Color::Auto,
            },
        ];
        fill_ids.insert(FillStyle::None, 0);

        let mut border_ids: HashMap<BorderStyle, u32> = HashMap::new();
        let mut borders: Vec<BorderStyle> = vec![BorderStyle::default()];
        border_ids.insert(BorderStyle::default(), 0);

        let mut numfmt_ids: HashMap<String, u32> = HashMap::new();
        let mut numfmts: Vec<(u32, String)> = Vec::new();
        let mut next_numfmt_id = FIRST_CUSTOM_NUMFMT_ID;

        let mut resolved: Vec<ResolvedXfIds> = Vec::with_capacity(self.styles.len());

        for style in &self.styles {
            let font_id = *font_ids.entry(style.font.clone()).or_insert_with(|| {
                fonts.push(style.font.clone());
                fonts.len() as u32 - 1
            });

            let fill_id = *fill_ids.entry(style.fill).or_insert_with(|| {
                fills.push(style.fill);
                fills.len() as u32 - 1
            });

            let border_id = *border_ids.entry(style.border).or_insert_with(|| {
                borders.push(style.border);
                borders.len() as u32 - 1
            });

            let num_fmt_id = match style.number_format.builtin_id() {
                Some(id) => id,
                None => {
                    let code = style.number_format.format_code().to_string();
                    *numfmt_ids.entry(code.clone()).or_insert_with(|| {
                        let id = next_numfmt_id;
                        next_numfmt_id += 1;
                        numfmts.push((id, code));
                        id
                    })
                }
            };

            resolved.push(ResolvedXfIds {
                font_id,
                fill_id,
                border_id,
                num_fmt_id,
            });
        }

        let mut xml = String::new();
        xml.push_str(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        if !numfmts.is_empty() {
            xml.push_str(&format!("\n  <numFmts count=\"{}\">", numfmts.len()));
            for (id, code) in &numfmts {
                xml.push_str(&format!(
                    "\n    <numFmt numFmtId=\"{}\" formatCode=\"{}\"/>",
                    id,
                    escape_xml(code)
                ));
            }
            xml.push_str("\n  </numFmts>");
        }

        xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
        for font in &fonts {
            xml.push_str("\n    ");
            xml.push_str(&write_font(font));
        }
        xml.push_str("\n  </fonts>");

        xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
        for fill in &fills {
            xml.push_str("\n    ");
            xml.push_str(&write_fill(fill));
        }
        xml.push_str("\n  </fills>");

        xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
        for border in &borders {
            xml.push_str("\n    ");
            xml.push_str(&write_border(border));
        }
        xml.push_str("\n  </borders>");

        xml.push_str(
            r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
        );

        xml.push_str(&format!("\n  <cellXfs count=\"{}\">", self.styles.len()));
        for (style, ids) in self.styles.iter().zip(&resolved) {
            xml.push_str("\n    ");
            xml.push_str(&write_xf(style, *ids));
        }
        xml.push_str("\n  </cellXfs>");

        xml.push_str(
            r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>
  <dxfs count="0"/>
  <tableStyles count="0" defaultTableStyle="TableStyleMedium9" defaultPivotStyle="PivotStyleLight16"/>
</styleSheet>"#,
        );
        xml
    }
}

/// Escape text for element content and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn color_attrs(color: &Color) -> String {
    if let Some(argb) = color.to_argb_hex() {
        return format!(" rgb=\"{}\"", argb);
    }
    match color {
        Color::Theme { index, tint } if *tint != 0 => {
            format!(" theme=\"{}\" tint=\"{}\"", index, f64::from(*tint) / 100.0)
        }
        Color::Theme { index, .. } => format!(" theme=\"{}\"", index),
        Color::Indexed(i) => format!(" indexed=\"{}\"", i),
        _ => format!(" indexed=\"{}\"", SYSTEM_FOREGROUND_INDEX),
    }
}

fn write_color(tag: &str, color: &Color) -> String {
    format!("<{}{}/>", tag, color_attrs(color))
}

fn write_font(font: &FontStyle) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    if font.strikethrough {
        s.push_str("<strike/>");
    }
    if font.underline {
        s.push_str("<u/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn write_fill(fill: &FillStyle) -> String {
    match fill {
        FillStyle::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        FillStyle::Solid { color } => format!(
            "<fill><patternFill patternType=\"solid\">{}{}</patternFill></fill>",
            write_color("fgColor", color),
            write_color("bgColor", &Color::Auto)
        ),
        FillStyle::Pattern {
            pattern,
            foreground,
            background,
        } => format!(
            "<fill><patternFill patternType=\"{}\">{}{}</patternFill></fill>",
            pattern.as_str(),
            write_color("fgColor", foreground),
            write_color("bgColor", background)
        ),
    }
}

fn write_border_edge(tag: &str, edge: &Option<BorderEdge>) -> String {
    match edge {
        None => format!("<{}/>", tag),
        Some(e) => format!(
            "<{tag} style=\"{}\">{}</{tag}>",
            e.style.as_str(),
            write_color("color", &e.color),
        ),
    }
}

fn write_border(border: &BorderStyle) -> String {
    let mut s = String::from("<border>");
    s.push_str(&write_border_edge("left", &border.left));
    s.push_str(&write_border_edge("right", &border.right));
    s.push_str(&write_border_edge("top", &border.top));
    s.push_str(&write_border_edge("bottom", &border.bottom));
    s.push_str("<diagonal/>");
    s.push_str("</border>");
    s
}

fn write_alignment(al: &Alignment) -> String {
    if al.is_default() {
        return String::new();
    }

    let default = Alignment::default();
    let mut s = String::from("<alignment");
    if al.horizontal != default.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", al.horizontal.as_str()));
    }
    if al.vertical != default.vertical {
        s.push_str(&format!(" vertical=\"{}\"", al.vertical.as_str()));
    }
    if al.wrap_text {
        s.push_str(" wrapText=\"1\"");
    }
    if al.indent != 0 {
        s.push_str(&format!(" indent=\"{}\"", al.indent));
    }
    if al.rotation != 0 {
        s.push_str(&format!(" textRotation=\"{}\"", al.rotation));
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &Style, ids: ResolvedXfIds) -> String {
    let mut attrs = String::new();
    if ids.num_fmt_id != 0 {
        attrs.push_str(" applyNumberFormat=\"1\"");
    }
    if ids.font_id != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if ids.fill_id != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if ids.border_id != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }
    if !style.alignment.is_default() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let head = format!(
        "<xf numFmtId=\"{}\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        ids.num_fmt_id, ids.font_id, ids.fill_id, ids.border_id, attrs
    );

    let alignment_xml = write_alignment(&style.alignment);
    if alignment_xml.is_empty() {
        format!("{}/>", head)
    } else {
        format!("{}>{}</xf>", head, alignment_xml)
    }
}

// === Reading ===

/// Read the `cellXfs` list of styles.xml, resolved into full styles.
///
/// The result is indexed by the `s` attribute of worksheet cells and always has
/// at least the default style at index 0.
pub(crate) fn read_styles_xml<R: Read>(reader: R) -> XlsxResult<Vec<Style>> {
    let mut xml_reader = Reader::from_reader(BufReader::new(reader));
    xml_reader.trim_text(true);

    let mut buf = Vec::new();
    let mut parser = StyleSheetParser::default();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => parser.start(&e, false),
            Ok(Event::Empty(e)) => parser.start(&e, true),
            Ok(Event::End(e)) => parser.end(e.name().as_ref()),
            Ok(Event::Eof) => break,
            Err(e) => return Err(XlsxError::Xml(e)),
            _ => {}
        }
        buf.clear();
    }

    Ok(parser.finish())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
    /// `diagonal` and anything else this model drops
    Ignored,
}

#[derive(Debug, Default)]
struct PendingFill {
    pattern: Option<String>,
    foreground: Option<Color>,
    background: Option<Color>,
}

#[derive(Debug, Default)]
struct PendingXf {
    num_fmt_id: u32,
    font_id: u32,
    fill_id: u32,
    border_id: u32,
    alignment: Alignment,
}

/// Event-driven state for one pass over styles.xml
#[derive(Debug, Default)]
struct StyleSheetParser {
    numfmts: HashMap<u32, String>,
    fonts: Vec<FontStyle>,
    fills: Vec<FillStyle>,
    borders: Vec<BorderStyle>,
    cell_xfs: Vec<Style>,

    font: Option<FontStyle>,
    fill: Option<PendingFill>,
    border: Option<BorderStyle>,
    edge: Option<Edge>,
    xf: Option<PendingXf>,
    in_cell_xfs: bool,
    in_dxfs: bool,
}

impl StyleSheetParser {
    /// Handle an opening tag. Self-closing tags are closed right away.
    fn start(&mut self, e: &BytesStart<'_>, self_closing: bool) {
        let name = e.name();
        let name = name.as_ref();

        if self.in_dxfs {
            // Differential formats reuse font/fill/border tags; none of them are kept
            return;
        }

        match name {
            b"numFmt" => {
                let id = attr_parse::<u32>(e, b"numFmtId");
                let code = attr_string(e, b"formatCode");
                if let (Some(id), Some(code)) = (id, code) {
                    self.numfmts.insert(id, code);
                }
            }

            b"font" => self.font = Some(FontStyle::default()),
            b"b" | b"i" | b"strike" | b"u" | b"sz" | b"name" => {
                if let Some(font) = self.font.as_mut() {
                    apply_font_property(font, name, e);
                }
            }

            b"fill" => self.fill = Some(PendingFill::default()),
            b"patternFill" => {
                if let Some(fill) = self.fill.as_mut() {
                    fill.pattern = attr_string(e, b"patternType");
                }
            }
            b"fgColor" => {
                if let Some(fill) = self.fill.as_mut() {
                    fill.foreground = Some(parse_color_attrs(e));
                }
            }
            b"bgColor" => {
                if let Some(fill) = self.fill.as_mut() {
                    fill.background = Some(parse_color_attrs(e));
                }
            }

            b"border" => self.border = Some(BorderStyle::default()),
            b"left" | b"right" | b"top" | b"bottom" | b"diagonal" => {
                if let Some(border) = self.border.as_mut() {
                    let edge = match name {
                        b"left" => Edge::Left,
                        b"right" => Edge::Right,
                        b"top" => Edge::Top,
                        b"bottom" => Edge::Bottom,
                        _ => Edge::Ignored,
                    };
                    // A line with no style attribute, or style="none", is no line
                    let line = attr_string(e, b"style").and_then(|s| BorderLineStyle::from_name(&s));
                    if let Some(style) = line {
                        set_border_edge(border, edge, Some(BorderEdge::new(style, Color::Auto)));
                    }
                    self.edge = Some(edge);
                }
            }

            b"color" => {
                let color = parse_color_attrs(e);
                if let Some(font) = self.font.as_mut() {
                    font.color = color;
                } else if let (Some(border), Some(edge)) = (self.border.as_mut(), self.edge) {
                    if let Some(mut current) = border_edge(border, edge) {
                        current.color = color;
                        set_border_edge(border, edge, Some(current));
                    }
                }
            }

            b"cellXfs" => self.in_cell_xfs = true,
            b"dxfs" => self.in_dxfs = !self_closing,
            b"xf" if self.in_cell_xfs => {
                self.xf = Some(PendingXf {
                    num_fmt_id: attr_parse(e, b"numFmtId").unwrap_or(0),
                    font_id: attr_parse(e, b"fontId").unwrap_or(0),
                    fill_id: attr_parse(e, b"fillId").unwrap_or(0),
                    border_id: attr_parse(e, b"borderId").unwrap_or(0),
                    alignment: Alignment::default(),
                });
            }
            b"alignment" => {
                if let Some(xf) = self.xf.as_mut() {
                    xf.alignment = parse_alignment(e);
                }
            }

            _ => {}
        }

        if self_closing {
            self.end(name);
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"dxfs" => self.in_dxfs = false,
            _ if self.in_dxfs => {}
            b"font" => {
                if let Some(font) = self.font.take() {
                    self.fonts.push(font);
                }
            }
            b"fill" => {
                if let Some(fill) = self.fill.take() {
                    self.fills.push(finalize_fill(fill));
                }
            }
            b"border" => {
                if let Some(border) = self.border.take() {
                    self.borders.push(border);
                }
                self.edge = None;
            }
            b"left" | b"right" | b"top" | b"bottom" | b"diagonal" => self.edge = None,
            b"xf" => {
                if let Some(xf) = self.xf.take() {
                    let style = self.resolve_style(xf);
                    self.cell_xfs.push(style);
                }
            }
            b"cellXfs" => self.in_cell_xfs = false,
            _ => {}
        }
    }

    fn resolve_style(&self, xf: PendingXf) -> Style {
        let number_format = if xf.num_fmt_id == 0 {
            NumberFormat::General
        } else if let Some(code) = self.numfmts.get(&xf.num_fmt_id) {
            NumberFormat::from_code(code)
        } else {
            NumberFormat::BuiltIn(xf.num_fmt_id)
        };

        Style {
            font: self
                .fonts
                .get(xf.font_id as usize)
                .cloned()
                .unwrap_or_default(),
            fill: self
                .fills
                .get(xf.fill_id as usize)
                .copied()
                .unwrap_or_default(),
            border: self
                .borders
                .get(xf.border_id as usize)
                .copied()
                .unwrap_or_default(),
            alignment: xf.alignment,
            number_format,
        }
    }

    fn finish(self) -> Vec<Style> {
        if self.cell_xfs.is_empty() {
            vec![Style::default()]
        } else {
            self.cell_xfs
        }
    }
}

fn apply_font_property(font: &mut FontStyle, name: &[u8], e: &BytesStart<'_>) {
    let val = attr_string(e, b"val");
    // <b/> means on; <b val="0"/> means off
    let on = !matches!(val.as_deref(), Some("0") | Some("false") | Some("none"));
    match name {
        b"b" => font.bold = on,
        b"i" => font.italic = on,
        b"strike" => font.strikethrough = on,
        b"u" => font.underline = on,
        b"sz" => {
            if let Some(size) = val.and_then(|v| v.parse::<f64>().ok()) {
                font.size = size;
            }
        }
        b"name" => {
            if let Some(v) = val {
                font.name = v;
            }
        }
        _ => {}
    }
}

fn parse_alignment(e: &BytesStart<'_>) -> Alignment {
    let mut align = Alignment::default();
    for attr in e.attributes().flatten() {
        let val = match attr.unescape_value() {
            Ok(v) => v,
            Err(_) => continue,
        };
        match attr.key.as_ref() {
            b"horizontal" => align.horizontal = HorizontalAlignment::from_name(&val),
            b"vertical" => align.vertical = VerticalAlignment::from_name(&val),
            b"wrapText" => align.wrap_text = val.as_ref() == "1" || val.as_ref() == "true",
            b"indent" => align.indent = val.parse::<u8>().unwrap_or(0),
            b"textRotation" => align.rotation = val.parse::<i16>().unwrap_or(0),
            _ => {}
        }
    }
    align
}

fn finalize_fill(fill: PendingFill) -> FillStyle {
    let foreground = fill.foreground.unwrap_or(Color::Auto);
    let background = fill.background.unwrap_or(Color::Auto);
    match fill.pattern.as_deref() {
        None | Some("none") => FillStyle::None,
        Some("solid") => FillStyle::Solid { color: foreground },
        // The reserved second fill; cells never really use it
        Some("gray125") => FillStyle::None,
        Some(other) => match PatternType::from_name(other) {
            Some(pattern) => FillStyle::Pattern {
                pattern,
                foreground,
                background,
            },
            None => {
                log::warn!("unknown fill pattern '{}', treating as no fill", other);
                FillStyle::None
            }
        },
    }
}

fn parse_color_attrs(e: &BytesStart<'_>) -> Color {
    if attr_string(e, b"auto").as_deref() == Some("1") {
        return Color::Auto;
    }
    if let Some(color) = attr_string(e, b"rgb").and_then(|rgb| Color::from_hex(&rgb)) {
        return color;
    }
    if let Some(index) = attr_parse::<u8>(e, b"theme") {
        let tint = attr_parse::<f64>(e, b"tint").unwrap_or(0.0);
        return Color::Theme {
            index,
            tint: (tint * 100.0).round().clamp(-100.0, 100.0) as i8,
        };
    }
    match attr_parse::<u8>(e, b"indexed") {
        Some(SYSTEM_FOREGROUND_INDEX) | None => Color::Auto,
        Some(i) => Color::Indexed(i),
    }
}

fn border_edge(border: &BorderStyle, edge: Edge) -> Option<BorderEdge> {
    match edge {
        Edge::Left => border.left,
        Edge::Right => border.right,
        Edge::Top => border.top,
        Edge::Bottom => border.bottom,
        Edge::Ignored => None,
    }
}

fn set_border_edge(border: &mut BorderStyle, edge: Edge, val: Option<BorderEdge>) {
    match edge {
        Edge::Left => border.left = val,
        Edge::Right => border.right = val,
        Edge::Top => border.top = val,
        Edge::Bottom => border.bottom = val,
        Edge::Ignored => {}
    }
}

pub(crate) fn attr_string(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok().map(|v| v.to_string()))
}

pub(crate) fn attr_parse<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> Option<T> {
    attr_string(e, key).and_then(|v| v.parse().ok())
}

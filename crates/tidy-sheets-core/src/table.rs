//! Value-only view of a sheet
//!
//! A [`Table`] is a rectangular grid of [`CellValue`]s whose first row is the
//! header. Row-level cleanup (blank removal, de-duplication, sorting) works here,
//! where no style information has to be carried along. The header row is never
//! filtered or moved.

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::cell::{CellError, CellValue, SharedString};
use crate::error::Result;
use crate::style::{NumberFormat, Style};
use crate::worksheet::Worksheet;

/// One table row
pub type Row = Vec<CellValue>;

/// Format given to date-time cells when a table becomes a worksheet
pub const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    name: String,
    header: Row,
    rows: Vec<Row>,
}

impl Table {
    /// Build a table, padding every row with empty cells to the widest row
    pub fn new<S: Into<String>>(name: S, header: Row, rows: Vec<Row>) -> Self {
        let mut table = Self {
            name: name.into(),
            header,
            rows,
        };
        table.pad();
        table
    }

    /// Split the first row off as the header
    pub fn from_rows<S: Into<String>>(name: S, mut rows: Vec<Row>) -> Self {
        let header = if rows.is_empty() {
            Vec::new()
        } else {
            rows.remove(0)
        };
        Self::new(name, header, rows)
    }

    /// Read the values of a worksheet. Every row between the first and last stored
    /// row is present, so rows with no cells at all come back as blank rows.
    pub fn from_worksheet(sheet: &Worksheet) -> Self {
        let (max_row, max_col) = match (sheet.max_row(), sheet.max_col()) {
            (Some(r), Some(c)) => (r, c),
            _ => return Self::new(sheet.name(), Vec::new(), Vec::new()),
        };

        let width = max_col as usize + 1;
        let mut grid: Vec<Row> = vec![vec![CellValue::Empty; width]; max_row as usize + 1];
        for (row, col, data) in sheet.iter_cells() {
            grid[row as usize][col as usize] = data.value.clone();
        }

        Self::from_rows(sheet.name(), grid)
    }

    /// Write the table into a fresh worksheet. Date-time cells get a
    /// `yyyy-mm-dd hh:mm:ss` format so they still read back as dates.
    pub fn to_worksheet(&self) -> Result<Worksheet> {
        let mut sheet = Worksheet::new(self.name.clone());
        let date_style = Style::new().number_format(NumberFormat::Custom(DATETIME_FORMAT.into()));

        for (r, row) in self.all_rows().enumerate() {
            for (c, value) in row.iter().enumerate() {
                if value.is_empty() {
                    continue;
                }
                sheet.set_cell_value_at(r as u32, c as u16, value.clone())?;
                if matches!(value, CellValue::DateTime(_)) {
                    sheet.set_cell_style_at(r as u32, c as u16, &date_style)?;
                }
            }
        }

        Ok(sheet)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> &Row {
        &self.header
    }

    /// Rows below the header
    pub fn data_rows(&self) -> &[Row] {
        &self.rows
    }

    /// Header followed by the data rows
    pub fn all_rows(&self) -> impl Iterator<Item = &Row> {
        std::iter::once(&self.header)
            .filter(|h| !h.is_empty())
            .chain(self.rows.iter())
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Drop data rows in which every cell is blank. Returns how many were dropped.
    pub fn remove_blank_rows(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|row| !row.iter().all(CellValue::is_blank));
        before - self.rows.len()
    }

    /// Drop data rows equal to an earlier data row, keeping the first occurrence.
    /// Returns how many were dropped.
    pub fn remove_duplicate_rows(&mut self) -> usize {
        let before = self.rows.len();
        let mut seen: HashSet<Vec<ValueKey>> = HashSet::with_capacity(before);
        self.rows
            .retain(|row| seen.insert(row.iter().map(ValueKey::from).collect()));
        before - self.rows.len()
    }

    /// Stable ascending sort of the data rows by one column. Blank values go last.
    pub fn sort_by_column(&mut self, col: usize) {
        self.rows.sort_by(|a, b| {
            let empty = CellValue::Empty;
            let x = a.get(col).unwrap_or(&empty);
            let y = b.get(col).unwrap_or(&empty);
            compare_values(x, y)
        });
    }

    fn pad(&mut self) {
        let width = std::iter::once(&self.header)
            .chain(self.rows.iter())
            .map(Vec::len)
            .max()
            .unwrap_or(0);
        // Only pad the header when there is something below it
        if width > 0 {
            self.header.resize(width, CellValue::Empty);
        }
        for row in &mut self.rows {
            row.resize(width, CellValue::Empty);
        }
    }
}

/// Ascending order used by [`Table::sort_by_column`].
///
/// Same-kind values compare naturally. Mixed kinds order as
/// number < date-time < text < boolean < error, and blanks always sort last.
pub fn compare_values(a: &CellValue, b: &CellValue) -> Ordering {
    let a = a.effective_value();
    let b = b.effective_value();

    match (a.is_blank(), b.is_blank()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    match (a, b) {
        (CellValue::Number(x), CellValue::Number(y))
        | (CellValue::DateTime(x), CellValue::DateTime(y)) => x.total_cmp(y),
        (CellValue::String(x), CellValue::String(y)) => x.as_str().cmp(y.as_str()),
        (CellValue::Boolean(x), CellValue::Boolean(y)) => x.cmp(y),
        (CellValue::Error(x), CellValue::Error(y)) => x.as_str().cmp(y.as_str()),
        (CellValue::Formula { text: x, .. }, CellValue::Formula { text: y, .. }) => x.cmp(y),
        _ => kind_rank(a).cmp(&kind_rank(b)),
    }
}

fn kind_rank(v: &CellValue) -> u8 {
    match v {
        CellValue::Number(_) => 0,
        CellValue::DateTime(_) => 1,
        CellValue::String(_) => 2,
        CellValue::Boolean(_) => 3,
        CellValue::Error(_) => 4,
        // formulas without a cached result
        CellValue::Formula { .. } => 5,
        CellValue::Empty => 6,
    }
}

/// Hashable identity of a value for duplicate detection
#[derive(Debug, PartialEq, Eq, Hash)]
enum ValueKey {
    Blank,
    Bool(bool),
    Number(u64),
    DateTime(u64),
    Text(SharedString),
    Error(CellError),
    Formula(String),
}

impl From<&CellValue> for ValueKey {
    fn from(value: &CellValue) -> Self {
        let value = value.effective_value();
        if value.is_blank() {
            return ValueKey::Blank;
        }
        match value {
            CellValue::Boolean(b) => ValueKey::Bool(*b),
            CellValue::Number(n) => ValueKey::Number(float_bits(*n)),
            CellValue::DateTime(n) => ValueKey::DateTime(float_bits(*n)),
            CellValue::String(s) => ValueKey::Text(s.clone()),
            CellValue::Error(e) => ValueKey::Error(*e),
            CellValue::Formula { text, .. } => ValueKey::Formula(text.clone()),
            CellValue::Empty => ValueKey::Blank,
        }
    }
}

/// Bit pattern with both zeros folded together
fn float_bits(n: f64) -> u64 {
    if n == 0.0 {
        0.0f64.to_bits()
    } else {
        n.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(v: &str) -> CellValue {
        CellValue::string(v)
    }

    fn n(v: f64) -> CellValue {
        CellValue::Number(v)
    }

    fn header() -> Row {
        vec![s("name"), s("qty")]
    }

    #[test]
    fn test_sort_is_stable() {
        let mut t = Table::new(
            "Sheet1",
            header(),
            vec![vec![s("B"), n(2.0)], vec![s("A"), n(1.0)], vec![s("B"), n(1.0)]],
        );
        t.sort_by_column(0);
        assert_eq!(
            t.data_rows(),
            &[vec![s("A"), n(1.0)], vec![s("B"), n(2.0)], vec![s("B"), n(1.0)]]
        );
        assert_eq!(t.header(), &header());
    }

    #[test]
    fn test_sort_mixed_kinds_and_blanks() {
        let mut t = Table::new(
            "Sheet1",
            vec![s("k")],
            vec![
                vec![CellValue::Empty],
                vec![s("b")],
                vec![CellValue::Boolean(true)],
                vec![n(10.0)],
                vec![s("a")],
                vec![n(-3.0)],
            ],
        );
        t.sort_by_column(0);
        let firsts: Vec<_> = t.data_rows().iter().map(|r| r[0].clone()).collect();
        assert_eq!(
            firsts,
            vec![n(-3.0), n(10.0), s("a"), s("b"), CellValue::Boolean(true), CellValue::Empty]
        );
    }

    #[test]
    fn test_remove_blank_rows() {
        let mut rows: Vec<Row> = (0..10).map(|i| vec![n(i as f64), s("x")]).collect();
        rows.insert(5, vec![CellValue::Empty, CellValue::Empty]);
        rows.insert(6, vec![s(""), CellValue::Empty]);
        let mut t = Table::new("Sheet1", header(), rows);

        assert_eq!(t.len(), 12);
        assert_eq!(t.remove_blank_rows(), 2);
        assert_eq!(t.len(), 10);
        assert_eq!(t.data_rows()[5], vec![n(5.0), s("x")]);
    }

    #[test]
    fn test_zero_is_not_blank() {
        let mut t = Table::new("Sheet1", header(), vec![vec![n(0.0), CellValue::Empty]]);
        assert_eq!(t.remove_blank_rows(), 0);
    }

    #[test]
    fn test_remove_duplicates_keeps_first() {
        let mut t = Table::new(
            "Sheet1",
            vec![s("id"), s("name")],
            vec![
                vec![n(1.0), s("X")],
                vec![n(2.0), s("Y")],
                vec![n(1.0), s("X")],
            ],
        );
        assert_eq!(t.remove_duplicate_rows(), 1);
        assert_eq!(t.data_rows(), &[vec![n(1.0), s("X")], vec![n(2.0), s("Y")]]);
    }

    #[test]
    fn test_duplicates_distinguish_kinds() {
        let mut t = Table::new(
            "Sheet1",
            vec![s("v")],
            vec![vec![n(1.0)], vec![s("1")], vec![CellValue::DateTime(1.0)], vec![n(-0.0)], vec![n(0.0)]],
        );
        assert_eq!(t.remove_duplicate_rows(), 1);
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn test_rows_are_padded() {
        let t = Table::from_rows("S", vec![vec![s("a")], vec![n(1.0), n(2.0), n(3.0)]]);
        assert_eq!(t.width(), 3);
        assert_eq!(t.header(), &vec![s("a"), CellValue::Empty, CellValue::Empty]);
    }

    #[test]
    fn test_worksheet_roundtrip_keeps_gaps() {
        let mut ws = Worksheet::new("Данные");
        ws.set_cell_value("A1", "id").unwrap();
        ws.set_cell_value("B1", "when").unwrap();
        ws.set_cell_value("A2", 1.0).unwrap();
        ws.set_cell_value_at(1, 1, CellValue::DateTime(45306.5)).unwrap();
        ws.set_cell_value("A4", 2.0).unwrap();

        let t = Table::from_worksheet(&ws);
        assert_eq!(t.name(), "Данные");
        assert_eq!(t.len(), 3);
        assert!(t.data_rows()[1].iter().all(CellValue::is_blank));

        let back = t.to_worksheet().unwrap();
        assert_eq!(back.value_at(3, 0), &n(2.0));
        assert_eq!(
            back.cell_style_at(1, 1).number_format,
            NumberFormat::Custom(DATETIME_FORMAT.into())
        );
        assert!(back.cell_style_at(1, 0).number_format == NumberFormat::General);
    }

    #[test]
    fn test_empty_sheet() {
        let t = Table::from_worksheet(&Worksheet::new("Empty"));
        assert!(t.is_empty());
        assert_eq!(t.width(), 0);
        assert_eq!(t.all_rows().count(), 0);
    }
}

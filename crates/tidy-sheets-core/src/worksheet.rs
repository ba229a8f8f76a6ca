//! Worksheet type

use std::collections::{BTreeMap, BTreeSet};

use crate::cell::{CellAddress, CellData, CellRange, CellStorage, CellValue};
use crate::error::{Error, Result};
use crate::style::{Style, StylePool};
use crate::{MAX_COLS, MAX_ROWS};

static EMPTY: CellValue = CellValue::Empty;

/// A single sheet: styled cells plus sheet-level display attributes
#[derive(Debug)]
pub struct Worksheet {
    name: String,
    cells: CellStorage,
    visible: bool,
    freeze_panes: Option<FreezePanes>,
}

/// Frozen rows/columns. `row = 1, col = 0` keeps the first row visible,
/// which Excel shows as a split at `A2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FreezePanes {
    /// Number of frozen rows
    pub row: u32,
    /// Number of frozen columns
    pub col: u16,
}

impl FreezePanes {
    /// First scrollable cell
    pub fn top_left_cell(&self) -> CellAddress {
        CellAddress::new(self.row, self.col)
    }
}

impl Worksheet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            cells: CellStorage::new(),
            visible: true,
            freeze_panes: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    // === Cell Access ===

    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Value at a position, [`CellValue::Empty`] when nothing is stored
    pub fn value_at(&self, row: u32, col: u16) -> &CellValue {
        self.cells.get(row, col).map_or(&EMPTY, |c| &c.value)
    }

    /// Value by A1 address
    pub fn get_value(&self, address: &str) -> Result<&CellValue> {
        let addr = CellAddress::parse(address)?;
        Ok(self.value_at(addr.row, addr.col))
    }

    pub fn style_index_at(&self, row: u32, col: u16) -> u32 {
        self.cells.get(row, col).map_or(0, |c| c.style_index)
    }

    /// Effective style of a cell; the default style for cells that have none
    pub fn cell_style_at(&self, row: u32, col: u16) -> &Style {
        let pool = self.cells.style_pool();
        pool.get(self.style_index_at(row, col))
            .unwrap_or_else(|| pool.default_style())
    }

    pub fn cell_style(&self, address: &str) -> Result<&Style> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cell_style_at(addr.row, addr.col))
    }

    // === Cell Modification ===

    pub fn set_cell_value<V: Into<CellValue>>(&mut self, address: &str, value: V) -> Result<()> {
        let addr = CellAddress::parse(address)?;
        self.set_cell_value_at(addr.row, addr.col, value)
    }

    pub fn set_cell_value_at<V: Into<CellValue>>(
        &mut self,
        row: u32,
        col: u16,
        value: V,
    ) -> Result<()> {
        check_position(row, col)?;
        self.cells.set_value(row, col, value.into());
        Ok(())
    }

    /// Replace a cell's whole style
    pub fn set_cell_style_at(&mut self, row: u32, col: u16, style: &Style) -> Result<()> {
        check_position(row, col)?;
        let index = self.cells.style_pool_mut().get_or_insert(style.clone());
        self.cells.set_style(row, col, index);
        Ok(())
    }

    /// Edit one part of a cell's style and keep the rest.
    ///
    /// ```
    /// use tidy_sheets_core::{Alignment, BorderStyle, Worksheet};
    ///
    /// let mut ws = Worksheet::new("Data");
    /// ws.set_cell_value("A1", 3.5).unwrap();
    /// ws.update_cell_style_at(0, 0, |s| s.border = BorderStyle::thin()).unwrap();
    /// ws.update_cell_style_at(0, 0, |s| s.alignment = Alignment::centered()).unwrap();
    ///
    /// let style = ws.cell_style_at(0, 0);
    /// assert_eq!(style.border, BorderStyle::thin());
    /// assert_eq!(style.alignment, Alignment::centered());
    /// ```
    pub fn update_cell_style_at<F>(&mut self, row: u32, col: u16, edit: F) -> Result<()>
    where
        F: FnOnce(&mut Style),
    {
        let mut style = self.cell_style_at(row, col).clone();
        edit(&mut style);
        self.set_cell_style_at(row, col, &style)
    }

    pub fn clear_cell_at(&mut self, row: u32, col: u16) {
        self.cells.remove(row, col);
    }

    // === Ranges ===

    /// Bounding box of every stored cell
    pub fn used_range(&self) -> Option<CellRange> {
        self.cells
            .used_bounds()
            .map(|(r0, c0, r1, c1)| CellRange::from_indices(r0, c0, r1, c1))
    }

    /// Largest row index holding a stored cell
    pub fn max_row(&self) -> Option<u32> {
        self.cells.used_bounds().map(|(_, _, r, _)| r)
    }

    /// Largest column index holding a stored cell
    pub fn max_col(&self) -> Option<u16> {
        self.cells.used_bounds().map(|(_, _, _, c)| c)
    }

    // === Rows & Columns ===

    pub fn row_height(&self, row: u32) -> f64 {
        self.cells.row_height(row)
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        self.cells.set_row_height(row, height);
    }

    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.cells.is_row_hidden(row)
    }

    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.cells.set_row_hidden(row, hidden);
    }

    pub fn column_width(&self, col: u16) -> f64 {
        self.cells.column_width(col)
    }

    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.cells.set_column_width(col, width);
    }

    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.cells.is_column_hidden(col)
    }

    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        self.cells.set_column_hidden(col, hidden);
    }

    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        self.cells.custom_row_heights()
    }

    pub fn hidden_rows(&self) -> &BTreeSet<u32> {
        self.cells.hidden_rows()
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        self.cells.custom_column_widths()
    }

    pub fn hidden_columns(&self) -> &BTreeSet<u16> {
        self.cells.hidden_columns()
    }

    // === Merged Cells ===

    pub fn merged_regions(&self) -> &[CellRange] {
        self.cells.merged_regions()
    }

    pub fn merge_cells(&mut self, range: &CellRange) -> Result<()> {
        if self.merged_regions().iter().any(|m| m.overlaps(range)) {
            return Err(Error::MergedCellConflict(range.to_string()));
        }
        self.cells.add_merged_region(*range);
        Ok(())
    }

    // === Freeze Panes ===

    pub fn freeze_panes(&self) -> Option<&FreezePanes> {
        self.freeze_panes.as_ref()
    }

    /// Freeze the first `row` rows and `col` columns. `(0, 0)` unfreezes.
    pub fn set_freeze_panes(&mut self, row: u32, col: u16) {
        self.freeze_panes = if row == 0 && col == 0 {
            None
        } else {
            Some(FreezePanes { row, col })
        };
    }

    // === Iteration ===

    pub fn cell_count(&self) -> usize {
        self.cells.cell_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter_cells(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.cells.iter()
    }

    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.cells.iter_row(row)
    }

    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.cells.row_indices()
    }

    pub fn style_pool(&self) -> &StylePool {
        self.cells.style_pool()
    }

    /// Store a cell with an index already valid in this sheet's pool
    pub fn put_cell(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        check_position(row, col)?;
        if self.cells.style_pool().get(data.style_index).is_none() {
            return Err(Error::other(format!(
                "style index {} not in pool",
                data.style_index
            )));
        }
        self.cells.set(row, col, data);
        Ok(())
    }

    pub fn intern_style(&mut self, style: Style) -> u32 {
        self.cells.style_pool_mut().get_or_insert(style)
    }
}

fn check_position(row: u32, col: u16) -> Result<()> {
    if row >= MAX_ROWS {
        return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
    }
    if col >= MAX_COLS {
        return Err(Error::ColumnOutOfBounds(col, MAX_COLS - 1));
    }
    Ok(())
}

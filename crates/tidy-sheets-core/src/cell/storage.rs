//! Sparse cell storage
//!
//! Only cells with a value or a non-default style are kept. Layout is
//! `BTreeMap<row, BTreeMap<col, CellData>>` so iteration is always row-major,
//! which is the order the XLSX writer needs.

use std::collections::{BTreeMap, BTreeSet};

use super::{CellRange, CellValue};
use crate::style::StylePool;

/// Value plus style reference for one cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    pub value: CellValue,
    /// Index into the owning sheet's [`StylePool`] (0 = default style)
    pub style_index: u32,
}

impl CellData {
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: 0,
        }
    }

    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self { value, style_index }
    }

    /// Nothing worth storing: no value and the default style
    pub fn is_vacant(&self) -> bool {
        self.value.is_empty() && self.style_index == 0
    }
}

/// Cells plus the row/column attributes of one sheet
#[derive(Debug)]
pub struct CellStorage {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
    style_pool: StylePool,
    default_row_height: f64,
    default_column_width: f64,
    row_heights: BTreeMap<u32, f64>,
    hidden_rows: BTreeSet<u32>,
    column_widths: BTreeMap<u16, f64>,
    hidden_columns: BTreeSet<u16>,
    merged_regions: Vec<CellRange>,
}

impl CellStorage {
    pub fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            style_pool: StylePool::new(),
            default_row_height: 15.0,
            default_column_width: 8.43,
            row_heights: BTreeMap::new(),
            hidden_rows: BTreeSet::new(),
            column_widths: BTreeMap::new(),
            hidden_columns: BTreeSet::new(),
            merged_regions: Vec::new(),
        }
    }

    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Store a cell, dropping it instead when it is vacant
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        if data.is_vacant() {
            self.remove(row, col);
        } else {
            self.rows.entry(row).or_default().insert(col, data);
        }
    }

    /// Replace the value and keep the style
    pub fn set_value(&mut self, row: u32, col: u16, value: CellValue) {
        let style_index = self.get(row, col).map_or(0, |c| c.style_index);
        self.set(row, col, CellData::with_style(value, style_index));
    }

    /// Replace the style and keep the value
    pub fn set_style(&mut self, row: u32, col: u16, style_index: u32) {
        let value = self
            .get(row, col)
            .map(|c| c.value.clone())
            .unwrap_or_default();
        self.set(row, col, CellData::with_style(value, style_index));
    }

    pub fn remove(&mut self, row: u32, col: u16) -> Option<CellData> {
        let row_map = self.rows.get_mut(&row)?;
        let removed = row_map.remove(&col);
        if row_map.is_empty() {
            self.rows.remove(&row);
        }
        removed
    }

    pub fn cell_count(&self) -> usize {
        self.rows.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// `(min_row, min_col, max_row, max_col)` over stored cells, styled blanks included
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;
        for cols in self.rows.values() {
            if let (Some(&first), Some(&last)) = (cols.keys().next(), cols.keys().next_back()) {
                min_col = min_col.min(first);
                max_col = max_col.max(last);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }

    /// Iterate over all stored cells in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    pub fn row_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    pub fn default_row_height(&self) -> f64 {
        self.default_row_height
    }

    pub fn row_height(&self, row: u32) -> f64 {
        self.row_heights
            .get(&row)
            .copied()
            .unwrap_or(self.default_row_height)
    }

    pub fn set_row_height(&mut self, row: u32, height: f64) {
        if (height - self.default_row_height).abs() < 0.001 {
            self.row_heights.remove(&row);
        } else {
            self.row_heights.insert(row, height);
        }
    }

    pub fn is_row_hidden(&self, row: u32) -> bool {
        self.hidden_rows.contains(&row)
    }

    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        if hidden {
            self.hidden_rows.insert(row);
        } else {
            self.hidden_rows.remove(&row);
        }
    }

    pub fn default_column_width(&self) -> f64 {
        self.default_column_width
    }

    pub fn column_width(&self, col: u16) -> f64 {
        self.column_widths
            .get(&col)
            .copied()
            .unwrap_or(self.default_column_width)
    }

    /// Record an explicit width. Explicit widths are kept even when they equal the
    /// default so that fitted columns are always written out.
    pub fn set_column_width(&mut self, col: u16, width: f64) {
        self.column_widths.insert(col, width);
    }

    pub fn is_column_hidden(&self, col: u16) -> bool {
        self.hidden_columns.contains(&col)
    }

    pub fn set_column_hidden(&mut self, col: u16, hidden: bool) {
        if hidden {
            self.hidden_columns.insert(col);
        } else {
            self.hidden_columns.remove(&col);
        }
    }

    pub fn custom_row_heights(&self) -> &BTreeMap<u32, f64> {
        &self.row_heights
    }

    pub fn hidden_rows(&self) -> &BTreeSet<u32> {
        &self.hidden_rows
    }

    pub fn custom_column_widths(&self) -> &BTreeMap<u16, f64> {
        &self.column_widths
    }

    pub fn hidden_columns(&self) -> &BTreeSet<u16> {
        &self.hidden_columns
    }

    pub fn merged_regions(&self) -> &[CellRange] {
        &self.merged_regions
    }

    pub fn add_merged_region(&mut self, range: CellRange) {
        self.merged_regions.push(range);
    }

    pub fn style_pool(&self) -> &StylePool {
        &self.style_pool
    }

    pub fn style_pool_mut(&mut self) -> &mut StylePool {
        &mut self.style_pool
    }
}

impl Default for CellStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vacant_cells_are_dropped() {
        let mut storage = CellStorage::new();

        storage.set(0, 0, CellData::new(CellValue::Number(42.0)));
        assert_eq!(storage.cell_count(), 1);

        storage.set_value(0, 0, CellValue::Empty);
        assert_eq!(storage.cell_count(), 0);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_styled_blank_is_kept() {
        let mut storage = CellStorage::new();
        storage.set_style(3, 2, 5);
        assert_eq!(storage.get(3, 2).map(|c| c.style_index), Some(5));

        storage.set_value(3, 2, CellValue::string("x"));
        let cell = storage.get(3, 2).unwrap();
        assert_eq!(cell.style_index, 5);
        assert_eq!(cell.value.as_string(), Some("x"));
    }

    #[test]
    fn test_used_bounds() {
        let mut storage = CellStorage::new();
        assert!(storage.used_bounds().is_none());

        storage.set(5, 3, CellData::new(CellValue::Number(1.0)));
        storage.set(10, 7, CellData::new(CellValue::Number(2.0)));
        storage.set(2, 1, CellData::new(CellValue::Number(3.0)));

        assert_eq!(storage.used_bounds(), Some((2, 1, 10, 7)));
    }

    #[test]
    fn test_row_and_column_attributes() {
        let mut storage = CellStorage::new();

        assert_eq!(storage.row_height(0), 15.0);
        assert_eq!(storage.column_width(0), 8.43);

        storage.set_row_height(5, 30.0);
        storage.set_column_width(3, 20.0);
        storage.set_row_hidden(10, true);
        storage.set_column_hidden(5, true);

        assert_eq!(storage.row_height(5), 30.0);
        assert_eq!(storage.column_width(3), 20.0);
        assert!(storage.is_row_hidden(10));
        assert!(storage.is_column_hidden(5));

        storage.set_row_hidden(10, false);
        assert!(storage.hidden_rows().is_empty());
    }

    #[test]
    fn test_iteration_is_row_major() {
        let mut storage = CellStorage::new();
        storage.set(1, 0, CellData::new(CellValue::Number(3.0)));
        storage.set(0, 1, CellData::new(CellValue::Number(2.0)));
        storage.set(0, 0, CellData::new(CellValue::Number(1.0)));

        let coords: Vec<_> = storage.iter().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0)]);
    }
}

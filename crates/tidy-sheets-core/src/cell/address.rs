//! A1-style cell addresses and ranges

use crate::error::{Error, Result};
use crate::{MAX_COLS, MAX_ROWS};
use std::fmt;
use std::str::FromStr;

/// Zero-based cell coordinate.
///
/// `$` markers are accepted when parsing and dropped; nothing in this crate
/// rewrites references, so absolute and relative forms are the same cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellAddress {
    pub row: u32,
    pub col: u16,
}

impl CellAddress {
    pub fn new(row: u32, col: u16) -> Self {
        Self { row, col }
    }

    /// Parse `"B7"`, `"$B$7"` or `"b7"`.
    ///
    /// ```
    /// use tidy_sheets_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("$C$10").unwrap();
    /// assert_eq!((addr.row, addr.col), (9, 2));
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || Error::InvalidAddress(s.to_string());

        let rest = s.strip_prefix('$').unwrap_or(s);
        let split = rest
            .find(|c: char| !c.is_ascii_alphabetic())
            .ok_or_else(bad)?;
        let (letters, digits) = rest.split_at(split);
        let digits = digits.strip_prefix('$').unwrap_or(digits);

        if letters.is_empty() || digits.is_empty() {
            return Err(bad());
        }

        let col = Self::letters_to_column(letters)?;
        let row: u32 = digits.parse().map_err(|_| bad())?;
        if row == 0 {
            return Err(bad());
        }
        if row > MAX_ROWS {
            return Err(Error::RowOutOfBounds(row - 1, MAX_ROWS - 1));
        }

        Ok(Self::new(row - 1, col))
    }

    /// 0 -> "A", 25 -> "Z", 26 -> "AA"
    pub fn column_to_letters(col: u16) -> String {
        let mut n = col as u32 + 1;
        let mut letters = Vec::with_capacity(3);
        while n > 0 {
            n -= 1;
            letters.push(b'A' + (n % 26) as u8);
            n /= 26;
        }
        letters.reverse();
        String::from_utf8_lossy(&letters).into_owned()
    }

    /// "A" -> 0, case-insensitive
    pub fn letters_to_column(letters: &str) -> Result<u16> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u32 = 0;
        for c in letters.chars() {
            if !c.is_ascii_alphabetic() {
                return Err(Error::InvalidAddress(format!("invalid column letter '{}'", c)));
            }
            col = col * 26 + (c.to_ascii_uppercase() as u32 - 'A' as u32 + 1);
            if col > MAX_COLS as u32 {
                return Err(Error::InvalidAddress(format!("column '{}' past XFD", letters)));
            }
        }

        Ok((col - 1) as u16)
    }

    pub fn to_a1_string(&self) -> String {
        format!("{}{}", Self::column_to_letters(self.col), self.row + 1)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Rectangular block of cells, always stored top-left to bottom-right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellRange {
    pub start: CellAddress,
    pub end: CellAddress,
}

impl CellRange {
    pub fn new(a: CellAddress, b: CellAddress) -> Self {
        Self {
            start: CellAddress::new(a.row.min(b.row), a.col.min(b.col)),
            end: CellAddress::new(a.row.max(b.row), a.col.max(b.col)),
        }
    }

    pub fn from_indices(start_row: u32, start_col: u16, end_row: u32, end_col: u16) -> Self {
        Self::new(
            CellAddress::new(start_row, start_col),
            CellAddress::new(end_row, end_col),
        )
    }

    /// Parse `"A1:C3"` or a single cell `"B2"`
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once(':') {
            Some((a, b)) => {
                let start =
                    CellAddress::parse(a).map_err(|_| Error::InvalidRange(s.to_string()))?;
                let end = CellAddress::parse(b).map_err(|_| Error::InvalidRange(s.to_string()))?;
                Ok(Self::new(start, end))
            }
            None => {
                let addr = CellAddress::parse(s)?;
                Ok(Self::new(addr, addr))
            }
        }
    }

    pub fn contains(&self, row: u32, col: u16) -> bool {
        (self.start.row..=self.end.row).contains(&row)
            && (self.start.col..=self.end.col).contains(&col)
    }

    pub fn overlaps(&self, other: &CellRange) -> bool {
        self.start.row <= other.end.row
            && other.start.row <= self.end.row
            && self.start.col <= other.end.col
            && other.start.col <= self.end.col
    }

    pub fn to_a1_string(&self) -> String {
        if self.start == self.end {
            self.start.to_a1_string()
        } else {
            format!("{}:{}", self.start, self.end)
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1_string())
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

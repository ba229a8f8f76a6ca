//! Workbook type

use crate::error::{Error, Result};
use crate::worksheet::Worksheet;
use crate::MAX_SHEET_NAME_LEN;

/// One or more worksheets, one of which is active
#[derive(Debug)]
pub struct Workbook {
    worksheets: Vec<Worksheet>,
    active_sheet: usize,
}

impl Workbook {
    /// Workbook with a single empty "Sheet1"
    pub fn new() -> Self {
        Self {
            worksheets: vec![Worksheet::new("Sheet1")],
            active_sheet: 0,
        }
    }

    /// Workbook with no worksheets, for readers that add sheets as they find them
    pub fn empty() -> Self {
        Self {
            worksheets: Vec::new(),
            active_sheet: 0,
        }
    }

    pub fn sheet_count(&self) -> usize {
        self.worksheets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.worksheets.is_empty()
    }

    pub fn worksheet(&self, index: usize) -> Option<&Worksheet> {
        self.worksheets.get(index)
    }

    pub fn worksheet_mut(&mut self, index: usize) -> Option<&mut Worksheet> {
        self.worksheets.get_mut(index)
    }

    pub fn worksheet_by_name(&self, name: &str) -> Option<&Worksheet> {
        self.worksheets.iter().find(|ws| ws.name() == name)
    }

    pub fn worksheets(&self) -> impl Iterator<Item = &Worksheet> {
        self.worksheets.iter()
    }

    /// Append a new empty sheet and return its index
    pub fn add_worksheet_with_name(&mut self, name: &str) -> Result<usize> {
        self.add_existing_worksheet(Worksheet::new(name))
    }

    /// Append an already-populated sheet and return its index
    pub fn add_existing_worksheet(&mut self, worksheet: Worksheet) -> Result<usize> {
        self.validate_sheet_name(worksheet.name())?;
        self.worksheets.push(worksheet);
        Ok(self.worksheets.len() - 1)
    }

    pub fn active_sheet(&self) -> usize {
        self.active_sheet
    }

    pub fn set_active_sheet(&mut self, index: usize) -> Result<()> {
        if index >= self.worksheets.len() {
            return Err(Error::SheetOutOfBounds(index, self.worksheets.len()));
        }
        self.active_sheet = index;
        Ok(())
    }

    /// The active sheet. A workbook with no sheets gets an empty "Sheet1" first.
    pub fn active_worksheet_mut(&mut self) -> &mut Worksheet {
        if self.worksheets.is_empty() {
            self.worksheets.push(Worksheet::new("Sheet1"));
            self.active_sheet = 0;
        }
        let index = self.active_sheet.min(self.worksheets.len() - 1);
        &mut self.worksheets[index]
    }

    pub fn active_worksheet(&self) -> Option<&Worksheet> {
        self.worksheets
            .get(self.active_sheet)
            .or_else(|| self.worksheets.first())
    }

    fn validate_sheet_name(&self, name: &str) -> Result<()> {
        if name.is_empty() {
            return Err(Error::InvalidSheetName("Sheet name cannot be empty".into()));
        }
        if name.chars().count() > MAX_SHEET_NAME_LEN {
            return Err(Error::InvalidSheetName(format!(
                "'{}' is longer than {} characters",
                name, MAX_SHEET_NAME_LEN
            )));
        }
        if let Some(c) = name.chars().find(|c| ":\\/?*[]".contains(*c)) {
            return Err(Error::InvalidSheetName(format!(
                "'{}' contains '{}'",
                name, c
            )));
        }
        let lower = name.to_lowercase();
        if self
            .worksheets
            .iter()
            .any(|ws| ws.name().to_lowercase() == lower)
        {
            return Err(Error::DuplicateSheetName(name.into()));
        }
        Ok(())
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

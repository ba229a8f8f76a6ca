//! Loading and saving spreadsheet files
//!
//! The format is picked from the file extension. XLSX files load either as a full
//! [`Workbook`] or as a [`Table`] of the first sheet; CSV files only load as tables.

use std::io;
use std::path::{Path, PathBuf};

use tidy_sheets_core::{Table, Workbook};
use tidy_sheets_csv::{CsvReadOptions, CsvReader, CsvWriteOptions, CsvWriter};
use tidy_sheets_xlsx::{XlsxReader, XlsxWriter};

use crate::error::{FormatterError, FormatterResult};

/// File formats the formatter reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Xlsx,
    Csv,
}

impl FileKind {
    /// Detect the format from the extension. Legacy `.xls` is recognised and refused.
    pub fn from_path(path: &Path) -> FormatterResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("xlsx") | Some("xlsm") => Ok(FileKind::Xlsx),
            Some("csv") => Ok(FileKind::Csv),
            Some("xls") => Err(FormatterError::format(format!(
                "{}: legacy .xls workbooks are not supported, save the file as .xlsx",
                path.display()
            ))),
            _ => Err(FormatterError::format(format!(
                "{}: unsupported file extension",
                path.display()
            ))),
        }
    }
}

pub(crate) fn ensure_exists(path: &Path) -> FormatterResult<()> {
    if path.as_os_str().is_empty() || !path.exists() {
        return Err(FormatterError::MissingFile(path.to_path_buf()));
    }
    Ok(())
}

/// Load every sheet of an XLSX workbook, styles included
pub fn load_workbook(path: &Path) -> FormatterResult<Workbook> {
    ensure_exists(path)?;
    match FileKind::from_path(path)? {
        FileKind::Xlsx => Ok(XlsxReader::read_file(path)?),
        FileKind::Csv => Err(FormatterError::format(format!(
            "{}: CSV files hold no styles, formatting needs an .xlsx file",
            path.display()
        ))),
    }
}

/// Load the first sheet of an XLSX workbook, or a CSV file, as a table
pub fn load_table(path: &Path) -> FormatterResult<Table> {
    ensure_exists(path)?;
    match FileKind::from_path(path)? {
        FileKind::Xlsx => {
            let workbook = XlsxReader::read_file(path)?;
            let sheet = workbook
                .worksheet(0)
                .ok_or_else(|| FormatterError::format("workbook has no sheets"))?;
            Ok(Table::from_worksheet(sheet))
        }
        FileKind::Csv => Ok(CsvReader::read_file(path, &CsvReadOptions::default())?),
    }
}

pub fn save_workbook(workbook: &Workbook, path: &Path) -> FormatterResult<()> {
    match FileKind::from_path(path)? {
        FileKind::Xlsx => Ok(XlsxWriter::write_file(workbook, path)?),
        FileKind::Csv => Err(FormatterError::format(format!(
            "{}: a styled workbook cannot be saved as CSV",
            path.display()
        ))),
    }
}

/// Save a table as a single-sheet workbook or as CSV
pub fn save_table(table: &Table, path: &Path) -> FormatterResult<()> {
    match FileKind::from_path(path)? {
        FileKind::Xlsx => {
            let mut workbook = Workbook::empty();
            workbook.add_existing_worksheet(table.to_worksheet()?)?;
            save_workbook(&workbook, path)
        }
        FileKind::Csv => Ok(CsvWriter::write_file(
            table,
            path,
            &CsvWriteOptions::default(),
        )?),
    }
}

/// `<dir>/<stem><suffix>.<ext>` next to `input`.
///
/// Refuses with an IO error when the result would overwrite the input.
pub fn derived_path(input: &Path, suffix: &str) -> FormatterResult<PathBuf> {
    let stem = input
        .file_stem()
        .ok_or_else(|| FormatterError::MissingFile(input.to_path_buf()))?;

    let mut name = stem.to_os_string();
    name.push(suffix);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }

    let output = input.with_file_name(name);
    if output == input {
        return Err(FormatterError::Io(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("refusing to overwrite the input file {}", input.display()),
        )));
    }
    Ok(output)
}

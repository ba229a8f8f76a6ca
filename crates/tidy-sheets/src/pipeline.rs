//! The composite full format: clean up rows, then style the result

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{FormatterError, FormatterResult};
use crate::io::{
    derived_path, ensure_exists, load_table, load_workbook, save_table, save_workbook, FileKind,
};
use crate::ops;
use crate::operation::Request;

/// Deletes the intermediate file when dropped, on success and on every error path
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        if !self.path.exists() {
            return;
        }
        match fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "removed intermediate file"),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "could not remove intermediate file"
            ),
        }
    }
}

/// Remove empty rows and duplicates, persist the cleaned table next to the input,
/// reload it as a workbook and apply every style. Returns the number of rows removed.
pub(crate) fn full_format(request: &Request, output: &Path) -> FormatterResult<usize> {
    let options = &request.options;
    ensure_exists(&request.input)?;
    if FileKind::from_path(&request.input)? == FileKind::Csv {
        return Err(FormatterError::format(format!(
            "{}: CSV files hold no styles, full format needs an .xlsx file",
            request.input.display()
        )));
    }

    let mut table = load_table(&request.input)?;
    let empty = ops::remove_empty_rows(&mut table);
    let duplicates = ops::remove_duplicates(&mut table);

    let temp = TempFile::new(derived_path(&request.input, &options.temp_suffix)?);
    save_table(&table, temp.path())?;
    drop(table);

    let mut workbook = load_workbook(temp.path())?;
    let sheet = workbook.active_worksheet_mut();
    ops::format_headers(sheet, options)?;
    ops::add_borders(sheet)?;
    ops::style_body(sheet, options)?;
    ops::auto_fit_columns(sheet, options);
    ops::freeze_header(sheet);

    save_workbook(&workbook, output)?;
    tracing::debug!(empty, duplicates, "full format cleaned rows");
    Ok(empty + duplicates)
}

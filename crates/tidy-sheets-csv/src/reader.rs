//! CSV reader

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::CsvReadOptions;
use tidy_sheets_core::{CellValue, Row, Table};

/// CSV file reader
pub struct CsvReader;

impl CsvReader {
    /// Read a CSV file into a table
    pub fn read_file<P: AsRef<Path>>(path: P, options: &CsvReadOptions) -> CsvResult<Table> {
        let file = File::open(path)?;
        Self::read(file, options)
    }

    /// Read CSV from any reader. The first record becomes the header.
    pub fn read<R: Read>(reader: R, options: &CsvReadOptions) -> CsvResult<Table> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut rows: Vec<Row> = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let row = record
                .iter()
                .map(|field| {
                    // the header stays text even when it looks like a number
                    if options.auto_detect_types && !rows.is_empty() {
                        detect_type(field)
                    } else if field.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::string(field)
                    }
                })
                .collect();
            rows.push(row);
        }

        log::debug!("read {} CSV records", rows.len());
        Ok(Table::from_rows(options.sheet_name.clone(), rows))
    }
}

/// Typed value for a field: booleans, finite numbers, else text
fn detect_type(field: &str) -> CellValue {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return CellValue::Empty;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return CellValue::Boolean(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return CellValue::Boolean(false);
    }

    // f64 parsing also accepts "inf" and "NaN", which stay text
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => CellValue::Number(n),
        _ => CellValue::string(field),
    }
}

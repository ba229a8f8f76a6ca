//! CSV writer

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::CsvResult;
use crate::options::{CsvWriteOptions, LineTerminator};
use tidy_sheets_core::{CellValue, Table};

/// CSV file writer
pub struct CsvWriter;

impl CsvWriter {
    /// Write a table to a CSV file
    pub fn write_file<P: AsRef<Path>>(
        table: &Table,
        path: P,
        options: &CsvWriteOptions,
    ) -> CsvResult<()> {
        let file = File::create(path)?;
        Self::write(table, file, options)
    }

    /// Write the header and every data row. Formulas are written as their cached
    /// result when they have one.
    pub fn write<W: Write>(table: &Table, writer: W, options: &CsvWriteOptions) -> CsvResult<()> {
        let terminator = match options.line_terminator {
            LineTerminator::LF => csv::Terminator::Any(b'\n'),
            LineTerminator::CRLF => csv::Terminator::CRLF,
        };

        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .terminator(terminator)
            .flexible(true)
            .from_writer(writer);

        let mut written = 0usize;
        for row in table.all_rows() {
            // a lone empty field is written as `""` so the row is not lost
            csv_writer.write_record(row.iter().map(field_text))?;
            written += 1;
        }

        csv_writer.flush()?;
        log::debug!("wrote {} CSV records", written);
        Ok(())
    }
}

fn field_text(value: &CellValue) -> String {
    match value {
        CellValue::Formula {
            cached_value: Some(cached),
            ..
        } => field_text(cached),
        other => other.display_text(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CsvReadOptions, CsvReader};
    use pretty_assertions::assert_eq;

    fn table() -> Table {
        Table::from_rows(
            "Sheet1",
            vec![
                vec!["ID".into(), "Название".into()],
                vec![1.into(), "Товар, А".into()],
                vec![CellValue::Empty, CellValue::Empty],
                vec![2.5.into(), true.into()],
            ],
        )
    }

    fn write_str(table: &Table) -> String {
        let mut buf = Vec::new();
        CsvWriter::write(table, &mut buf, &CsvWriteOptions::default()).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_write_table() {
        assert_eq!(
            write_str(&table()),
            "ID,Название\n1,\"Товар, А\"\n,\n2.5,TRUE\n"
        );
    }

    #[test]
    fn test_write_then_read() {
        let original = table();
        let text = write_str(&original);
        let back = CsvReader::read(text.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_formula_writes_cached_value() {
        let t = Table::from_rows(
            "Sheet1",
            vec![
                vec!["Sum".into()],
                vec![CellValue::Formula {
                    text: "=1+1".into(),
                    cached_value: Some(Box::new(CellValue::Number(2.0))),
                }],
            ],
        );
        assert_eq!(write_str(&t), "Sum\n2\n");
    }

    #[test]
    fn test_single_blank_column_row_survives() {
        let t = Table::from_rows(
            "Sheet1",
            vec![vec!["A".into()], vec![CellValue::Empty], vec![1.into()]],
        );
        let text = write_str(&t);
        let back = CsvReader::read(text.as_bytes(), &CsvReadOptions::default()).unwrap();
        assert_eq!(text, "A\n\"\"\n1\n");
        assert_eq!(back, t);
    }

    #[test]
    fn test_write_file_crlf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let options = CsvWriteOptions {
            line_terminator: LineTerminator::CRLF,
            ..Default::default()
        };
        CsvWriter::write_file(&table(), &path, &options).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ID,Название\r\n"));
    }
}

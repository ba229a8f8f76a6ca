//! Named operations and the dispatcher that runs them against a file

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tidy_sheets_core::{Table, Worksheet};

use crate::error::{FormatterError, FormatterResult};
use crate::io::{derived_path, load_table, load_workbook, save_table, save_workbook};
use crate::ops;
use crate::options::FormatOptions;
use crate::pipeline;

/// Every operation the formatter offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FormatHeaders,
    AutoFitColumns,
    AddBorders,
    FormatNumbers,
    CenterAlign,
    RemoveEmptyRows,
    RemoveDuplicates,
    FreezeHeader,
    SortByFirstColumn,
    FullFormat,
}

impl Operation {
    pub const ALL: [Operation; 10] = [
        Operation::FormatHeaders,
        Operation::AutoFitColumns,
        Operation::AddBorders,
        Operation::FormatNumbers,
        Operation::CenterAlign,
        Operation::RemoveEmptyRows,
        Operation::RemoveDuplicates,
        Operation::FreezeHeader,
        Operation::SortByFirstColumn,
        Operation::FullFormat,
    ];

    /// Kebab-case name, as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FormatHeaders => "format-headers",
            Operation::AutoFitColumns => "auto-fit-columns",
            Operation::AddBorders => "add-borders",
            Operation::FormatNumbers => "format-numbers",
            Operation::CenterAlign => "center-align",
            Operation::RemoveEmptyRows => "remove-empty-rows",
            Operation::RemoveDuplicates => "remove-duplicates",
            Operation::FreezeHeader => "freeze-header",
            Operation::SortByFirstColumn => "sort-by-first-column",
            Operation::FullFormat => "full-format",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Operation::FormatHeaders => "Bold white header text on a blue fill, centered",
            Operation::AutoFitColumns => "Size each column to its longest value",
            Operation::AddBorders => "Thin border around every non-empty cell",
            Operation::FormatNumbers => "Apply #,##0.00 to numbers below the header",
            Operation::CenterAlign => "Center every non-empty cell",
            Operation::RemoveEmptyRows => "Drop rows with no values",
            Operation::RemoveDuplicates => "Drop repeated rows, keeping the first",
            Operation::FreezeHeader => "Keep the header row visible while scrolling",
            Operation::SortByFirstColumn => "Sort rows by column A, ascending",
            Operation::FullFormat => "Clean up rows, then apply every style",
        }
    }

    /// Operations that work on values only, and so also accept CSV
    pub fn is_table_operation(&self) -> bool {
        matches!(
            self,
            Operation::RemoveEmptyRows | Operation::RemoveDuplicates | Operation::SortByFirstColumn
        )
    }

    /// Load the input, apply this operation, and write `<stem>_formatted<ext>`
    pub fn run(self, request: &Request) -> FormatterResult<Report> {
        let _span = tracing::info_span!("operation", name = self.name()).entered();
        request.options.validate()?;

        let output = derived_path(&request.input, &request.options.output_suffix)?;
        let removed = match self {
            Operation::FullFormat => Some(pipeline::full_format(request, &output)?),
            Operation::RemoveEmptyRows => {
                Some(edit_table(request, &output, ops::remove_empty_rows)?)
            }
            Operation::RemoveDuplicates => {
                Some(edit_table(request, &output, ops::remove_duplicates)?)
            }
            Operation::SortByFirstColumn => {
                edit_table(request, &output, ops::sort_by_first_column)?;
                None
            }
            Operation::FormatHeaders => {
                edit_active_sheet(request, &output, ops::format_headers)?;
                None
            }
            Operation::AutoFitColumns => {
                edit_active_sheet(request, &output, |sheet, options| {
                    ops::auto_fit_columns(sheet, options);
                    Ok(())
                })?;
                None
            }
            Operation::AddBorders => {
                edit_active_sheet(request, &output, |sheet, _| ops::add_borders(sheet))?;
                None
            }
            Operation::FormatNumbers => {
                edit_active_sheet(request, &output, ops::format_numbers)?;
                None
            }
            Operation::CenterAlign => {
                edit_active_sheet(request, &output, |sheet, _| ops::center_align(sheet))?;
                None
            }
            Operation::FreezeHeader => {
                edit_active_sheet(request, &output, |sheet, _| {
                    ops::freeze_header(sheet);
                    Ok(())
                })?;
                None
            }
        };

        let report = Report {
            operation: self,
            output,
            removed,
        };
        tracing::info!(output = %report.output.display(), "{}", report.summary());
        Ok(report)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = FormatterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace('_', "-");
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == wanted)
            .ok_or_else(|| FormatterError::UnknownOperation(s.to_string()))
    }
}

/// Input of one operation
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub input: PathBuf,
    pub options: FormatOptions,
}

impl Request {
    pub fn new<P: Into<PathBuf>>(input: P) -> Self {
        Self {
            input: input.into(),
            options: FormatOptions::default(),
        }
    }

    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }
}

/// Outcome of a successful operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub operation: Operation,
    pub output: PathBuf,
    /// Rows dropped, for operations that remove rows
    pub removed: Option<usize>,
}

impl Report {
    /// What happened, without the output path
    pub fn summary(&self) -> String {
        let removed = self.removed.unwrap_or(0);
        match self.operation {
            Operation::FormatHeaders => "Formatted headers".to_string(),
            Operation::AutoFitColumns => "Adjusted column widths".to_string(),
            Operation::AddBorders => "Added borders".to_string(),
            Operation::FormatNumbers => "Formatted numbers".to_string(),
            Operation::CenterAlign => "Centered cells".to_string(),
            Operation::RemoveEmptyRows => format!("Removed {} empty rows", removed),
            Operation::RemoveDuplicates => format!("Removed {} duplicate rows", removed),
            Operation::FreezeHeader => "Froze header row".to_string(),
            Operation::SortByFirstColumn => "Sorted rows by first column".to_string(),
            Operation::FullFormat => format!("Applied full format, removed {} rows", removed),
        }
    }
}

impl fmt::Display for Report {
    /// `Removed 2 empty rows -> data_formatted.xlsx`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .output
            .file_name()
            .map(Path::new)
            .unwrap_or(self.output.as_path());
        write!(f, "{} -> {}", self.summary(), name.display())
    }
}

/// Run an operation chosen by name
pub fn run(name: &str, request: &Request) -> FormatterResult<Report> {
    name.parse::<Operation>()?.run(request)
}

fn edit_table<T>(
    request: &Request,
    output: &Path,
    edit: impl FnOnce(&mut Table) -> T,
) -> FormatterResult<T> {
    let mut table = load_table(&request.input)?;
    let result = edit(&mut table);
    save_table(&table, output)?;
    Ok(result)
}

fn edit_active_sheet(
    request: &Request,
    output: &Path,
    edit: impl FnOnce(&mut Worksheet, &FormatOptions) -> FormatterResult<()>,
) -> FormatterResult<()> {
    let mut workbook = load_workbook(&request.input)?;
    edit(workbook.active_worksheet_mut(), &request.options)?;
    save_workbook(&workbook, output)
}

//! tidy - spreadsheet formatting and cleanup from the command line

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tidy_sheets::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tidy")]
#[command(
    author,
    version,
    about = "Apply formatting and cleanup to spreadsheet files",
    long_about = "Each command reads <input> and writes <stem>_formatted<ext> next to it. \
                  The input file is never modified."
)]
struct Cli {
    /// JSON file with formatting options
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Bold white header text on a blue fill, centered
    FormatHeaders { input: PathBuf },

    /// Size each column to its longest value
    AutoFitColumns { input: PathBuf },

    /// Thin border around every non-empty cell
    AddBorders { input: PathBuf },

    /// Apply #,##0.00 to numbers below the header
    FormatNumbers { input: PathBuf },

    /// Center every non-empty cell
    CenterAlign { input: PathBuf },

    /// Drop rows with no values (also accepts .csv)
    RemoveEmptyRows { input: PathBuf },

    /// Drop repeated rows, keeping the first (also accepts .csv)
    RemoveDuplicates { input: PathBuf },

    /// Keep the header row visible while scrolling
    FreezeHeader { input: PathBuf },

    /// Sort rows by column A, ascending (also accepts .csv)
    SortByFirstColumn { input: PathBuf },

    /// Remove empty and duplicate rows, then apply every style
    FullFormat { input: PathBuf },

    /// Run an operation chosen by name
    Run {
        /// Operation name, see `tidy operations`
        operation: String,
        input: PathBuf,
    },

    /// List the available operations
    Operations,

    /// Write a demonstration workbook to try the operations on
    Sample {
        /// Where to write it (.xlsx or .csv)
        path: PathBuf,
    },
}

impl Commands {
    /// The operation and input for commands that run one
    fn operation(&self) -> Option<(Operation, &Path)> {
        let (op, input) = match self {
            Commands::FormatHeaders { input } => (Operation::FormatHeaders, input),
            Commands::AutoFitColumns { input } => (Operation::AutoFitColumns, input),
            Commands::AddBorders { input } => (Operation::AddBorders, input),
            Commands::FormatNumbers { input } => (Operation::FormatNumbers, input),
            Commands::CenterAlign { input } => (Operation::CenterAlign, input),
            Commands::RemoveEmptyRows { input } => (Operation::RemoveEmptyRows, input),
            Commands::RemoveDuplicates { input } => (Operation::RemoveDuplicates, input),
            Commands::FreezeHeader { input } => (Operation::FreezeHeader, input),
            Commands::SortByFirstColumn { input } => (Operation::SortByFirstColumn, input),
            Commands::FullFormat { input } => (Operation::FullFormat, input),
            Commands::Run { .. } | Commands::Operations | Commands::Sample { .. } => return None,
        };
        Some((op, input.as_path()))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    if let Some((op, input)) = cli.command.operation() {
        let options = load_options(cli.config.as_deref())?;
        return execute(op, input, options);
    }

    match cli.command {
        Commands::Run { operation, input } => {
            let op: Operation = operation.parse()?;
            let options = load_options(cli.config.as_deref())?;
            execute(op, &input, options)
        }
        Commands::Operations => {
            list_operations();
            Ok(())
        }
        Commands::Sample { path } => {
            tidy_sheets::write_sample(&path)
                .with_context(|| format!("Failed to write sample '{}'", path.display()))?;
            println!("Sample written to {}", path.display());
            Ok(())
        }
        _ => Ok(()),
    }
}

fn load_options(config: Option<&Path>) -> Result<FormatOptions> {
    let options = match config {
        Some(path) => FormatOptions::from_file(path)?,
        None => FormatOptions::default(),
    };
    tracing::debug!(?options, "formatting options");
    Ok(options)
}

fn execute(op: Operation, input: &Path, options: FormatOptions) -> Result<()> {
    let request = Request::new(input).with_options(options);
    let report = op
        .run(&request)
        .with_context(|| format!("{} failed on '{}'", op, input.display()))?;
    println!("{}", report);
    Ok(())
}

fn list_operations() {
    let width = Operation::ALL
        .iter()
        .map(|op| op.name().len())
        .max()
        .unwrap_or(0);
    for op in Operation::ALL {
        println!("{:width$}  {}", op.name(), op.description(), width = width);
    }
}

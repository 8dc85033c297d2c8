//! Command-line interface definitions for mediadupe.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options control verbosity, color and error formatting; each subcommand
//! runs one report pipeline.
//!
//! # Example
//!
//! ```bash
//! # Duplicate report over both libraries, all formats
//! mediadupe duplicates --movies /media/Movies --series /media/TV
//!
//! # Only the CSV report, written to ./reports
//! mediadupe duplicates --format csv --output-dir reports
//!
//! # Series listing as text, library taken from the environment
//! MEDIADUPE_SERIES_DIR=/media/TV mediadupe series --format txt
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{
    DEFAULT_MOVIES_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_SERIES_DIR, MOVIES_DIR_ENV, SERIES_DIR_ENV,
};
use crate::output::{ReportFormat, DEFAULT_PDF_MAX_EXAMPLES, DEFAULT_PDF_MAX_GROUPS};

/// Duplicate video finder and title lister for media libraries.
///
/// mediadupe scans a movie and a series library one folder deep, groups
/// video files that share a name (ignoring case) and writes text, CSV and
/// PDF reports. It can also list the titles of a single library.
#[derive(Debug, Parser)]
#[command(name = "mediadupe")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    pub no_color: bool,

    /// Print errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Find video files with the same name across the movie and series libraries
    Duplicates(DuplicatesArgs),
    /// List the titles of the movie library
    Movies(MoviesArgs),
    /// List the titles and episodes of the series library
    Series(SeriesArgs),
}

/// Arguments for the duplicates subcommand.
#[derive(Debug, Args)]
pub struct DuplicatesArgs {
    /// Movie library (one folder per movie)
    #[arg(long, value_name = "DIR", env = MOVIES_DIR_ENV, default_value = DEFAULT_MOVIES_DIR)]
    pub movies: PathBuf,

    /// Series library (one folder per series)
    #[arg(long, value_name = "DIR", env = SERIES_DIR_ENV, default_value = DEFAULT_SERIES_DIR)]
    pub series: PathBuf,

    /// Directory the reports are written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Report formats to write (default: all available)
    ///
    /// Can be repeated or comma separated, e.g. `--format txt,csv`.
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub format: Vec<FormatArg>,

    /// Number of duplicate groups shown in the PDF report
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PDF_MAX_GROUPS, value_parser = parse_positive)]
    pub pdf_max_groups: usize,

    /// Number of copies listed per group in the PDF report
    #[arg(long, value_name = "N", default_value_t = DEFAULT_PDF_MAX_EXAMPLES, value_parser = parse_positive)]
    pub pdf_max_examples: usize,
}

/// Arguments for the movies subcommand.
#[derive(Debug, Args)]
pub struct MoviesArgs {
    /// Movie library (one folder per movie)
    #[arg(long, value_name = "DIR", env = MOVIES_DIR_ENV, default_value = DEFAULT_MOVIES_DIR)]
    pub dir: PathBuf,

    #[command(flatten)]
    pub output: ListOutputArgs,
}

/// Arguments for the series subcommand.
#[derive(Debug, Args)]
pub struct SeriesArgs {
    /// Series library (one folder per series)
    #[arg(long, value_name = "DIR", env = SERIES_DIR_ENV, default_value = DEFAULT_SERIES_DIR)]
    pub dir: PathBuf,

    #[command(flatten)]
    pub output: ListOutputArgs,
}

/// Output options shared by the listing subcommands.
#[derive(Debug, Args)]
pub struct ListOutputArgs {
    /// Directory the listing is written to
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Listing formats to write (default: all available)
    #[arg(short, long, value_enum, value_delimiter = ',')]
    pub format: Vec<ListFormatArg>,
}

/// Report format for the duplicates subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Plain text report
    Txt,
    /// Semicolon-separated spreadsheet
    Csv,
    /// Printable PDF
    Pdf,
}

impl From<FormatArg> for ReportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Txt => ReportFormat::Text,
            FormatArg::Csv => ReportFormat::Csv,
            FormatArg::Pdf => ReportFormat::Pdf,
        }
    }
}

/// Listing format for the movies and series subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormatArg {
    /// Plain text listing
    Txt,
    /// Printable PDF
    Pdf,
}

impl From<ListFormatArg> for ReportFormat {
    fn from(arg: ListFormatArg) -> Self {
        match arg {
            ListFormatArg::Txt => ReportFormat::Text,
            ListFormatArg::Pdf => ReportFormat::Pdf,
        }
    }
}

/// Parse a count that must be at least 1.
///
/// # Errors
///
/// Returns an error if the string is not a number or is zero.
pub fn parse_positive(s: &str) -> Result<usize, String> {
    let n: usize = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid number: '{s}'"))?;
    if n == 0 {
        return Err("Value must be at least 1".to_string());
    }
    Ok(n)
}

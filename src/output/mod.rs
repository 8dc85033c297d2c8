//! Report formatters for duplicate scan results.
//!
//! This module provides different output formats for a [`DuplicateIndex`]:
//! - Plain text for reading
//! - CSV for spreadsheet import
//! - PDF for printing (requires the `pdf` feature)
//!
//! Every format implements [`ReportRenderer`]. The formats available in a
//! given build are collected in a [`ReportRegistry`]; a format that was not
//! compiled in is simply absent from it.
//!
//! # Example
//!
//! ```no_run
//! use mediadupe::duplicates::group_by_name;
//! use mediadupe::output::{ReportFormat, ReportMeta, ReportOptions, ReportRegistry};
//! use std::path::Path;
//!
//! let index = group_by_name(&[]);
//! let registry = ReportRegistry::available(&ReportOptions::default());
//! let meta = ReportMeta::now();
//!
//! let text = registry.get(ReportFormat::Text).unwrap();
//! mediadupe::output::write_report(text, &index, &meta, Path::new("lista_duplicados.txt")).unwrap();
//! ```

pub mod csv;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod size;
pub mod text;

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::duplicates::DuplicateIndex;

// Re-export main types
pub use self::csv::CsvReport;
#[cfg(feature = "pdf")]
pub use self::pdf::PdfReport;
pub use self::size::format_size;
pub use self::text::TextReport;

/// Width of the `=` and `-` rules in text reports.
pub const RULE_WIDTH: usize = 80;

/// Default number of groups shown in the PDF report.
pub const DEFAULT_PDF_MAX_GROUPS: usize = 50;
/// Default number of copies listed per group in the PDF report.
pub const DEFAULT_PDF_MAX_EXAMPLES: usize = 3;

/// Errors that can occur while producing a report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// The output file could not be created or written.
    #[error("Cannot write {}", path.display())]
    Write {
        /// Destination file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The format exists but does not apply to this kind of report.
    #[error("{format} output is not supported for {report}")]
    Unsupported {
        /// Requested format
        format: ReportFormat,
        /// Kind of report being written
        report: &'static str,
    },

    /// The format was not compiled into this build.
    #[error("{0} output is not available in this build (enable the `{0}` feature)")]
    MissingDependency(ReportFormat),
}

/// Supported report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ReportFormat {
    /// Plain UTF-8 text
    Text,
    /// Semicolon-separated values with a byte-order mark
    Csv,
    /// PDF document
    Pdf,
}

impl ReportFormat {
    /// All formats, in the order reports are written.
    pub const ALL: [ReportFormat; 3] = [ReportFormat::Text, ReportFormat::Csv, ReportFormat::Pdf];

    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    /// Default file name of the duplicate report in this format.
    #[must_use]
    pub fn default_file_name(self) -> String {
        format!("lista_duplicados.{}", self.extension())
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Information printed alongside the duplicate groups.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    /// When the report was generated
    pub generated_at: DateTime<Local>,
}

impl ReportMeta {
    /// Metadata stamped with the current local time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            generated_at: Local::now(),
        }
    }

    /// Full timestamp, e.g. `18/10/2026 14:05:09`.
    #[must_use]
    pub fn timestamp(&self) -> String {
        self.generated_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }

    /// Timestamp without seconds, e.g. `18/10/2026 14:05`.
    #[must_use]
    pub fn short_timestamp(&self) -> String {
        self.generated_at.format("%d/%m/%Y %H:%M").to_string()
    }
}

/// Options affecting how reports are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Groups shown in the PDF report
    pub pdf_max_groups: usize,
    /// Copies listed per group in the PDF report
    pub pdf_max_examples: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            pdf_max_groups: DEFAULT_PDF_MAX_GROUPS,
            pdf_max_examples: DEFAULT_PDF_MAX_EXAMPLES,
        }
    }
}

/// A report format that turns a duplicate index into a document.
pub trait ReportRenderer {
    /// The format this renderer produces.
    fn format(&self) -> ReportFormat;

    /// Render `index` into `out`.
    ///
    /// # Errors
    ///
    /// Returns `OutputError` if writing or serialization fails.
    fn render(
        &self,
        index: &DuplicateIndex,
        meta: &ReportMeta,
        out: &mut dyn Write,
    ) -> Result<(), OutputError>;
}

/// Report formats available in this build.
pub struct ReportRegistry {
    renderers: Vec<Box<dyn ReportRenderer>>,
}

impl ReportRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            renderers: Vec::new(),
        }
    }

    /// Registry holding every format compiled into this build.
    #[must_use]
    pub fn available(options: &ReportOptions) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(TextReport::new()));
        registry.register(Box::new(CsvReport::new()));
        #[cfg(feature = "pdf")]
        registry.register(Box::new(PdfReport::new(
            options.pdf_max_groups,
            options.pdf_max_examples,
        )));
        #[cfg(not(feature = "pdf"))]
        let _ = options;
        registry
    }

    /// Add a renderer, replacing any existing one for the same format.
    pub fn register(&mut self, renderer: Box<dyn ReportRenderer>) {
        self.renderers.retain(|r| r.format() != renderer.format());
        self.renderers.push(renderer);
    }

    /// Check whether a format is available.
    #[must_use]
    pub fn contains(&self, format: ReportFormat) -> bool {
        self.renderers.iter().any(|r| r.format() == format)
    }

    /// Formats available, in registration order.
    #[must_use]
    pub fn formats(&self) -> Vec<ReportFormat> {
        self.renderers.iter().map(|r| r.format()).collect()
    }

    /// Look up the renderer for a format.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::MissingDependency`] if the format is not registered.
    pub fn get(&self, format: ReportFormat) -> Result<&dyn ReportRenderer, OutputError> {
        self.renderers
            .iter()
            .find(|r| r.format() == format)
            .map(|r| r.as_ref())
            .ok_or(OutputError::MissingDependency(format))
    }
}

impl Default for ReportRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a report into a file, replacing any existing file.
///
/// # Errors
///
/// Returns [`OutputError::Write`] if the file cannot be created, or the
/// renderer's error if rendering fails.
pub fn write_report(
    renderer: &dyn ReportRenderer,
    index: &DuplicateIndex,
    meta: &ReportMeta,
    path: &Path,
) -> Result<(), OutputError> {
    write_file(path, |out| renderer.render(index, meta, out))?;
    log::debug!("Wrote {} report to {}", renderer.format(), path.display());
    Ok(())
}

/// Create (or truncate) `path` and hand a buffered writer to `render`.
///
/// # Errors
///
/// Returns [`OutputError::Write`] if the file cannot be created or flushed,
/// or whatever `render` returns.
pub fn write_file<F>(path: &Path, render: F) -> Result<(), OutputError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), OutputError>,
{
    let write_error = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    render(&mut writer)?;
    writer.flush().map_err(write_error)?;
    Ok(())
}

/// Render a report into a string. Intended for text-based formats.
///
/// # Errors
///
/// Returns the renderer's error if rendering fails.
pub fn render_to_string(
    renderer: &dyn ReportRenderer,
    index: &DuplicateIndex,
    meta: &ReportMeta,
) -> Result<String, OutputError> {
    let mut buffer = Vec::new();
    renderer.render(index, meta, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

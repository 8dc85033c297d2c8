//! Text and PDF rendering of title listings.

use std::io::Write;
use std::path::Path;

use super::Catalog;
use crate::output::{write_file, OutputError, ReportFormat, ReportMeta, RULE_WIDTH};

#[cfg(feature = "pdf")]
use crate::output::pdf::{PdfDocument, TextStyle};

fn title_line(catalog: &Catalog, position: usize, title: &str, files: usize) -> String {
    if catalog.kind().counts_files() {
        format!("{position}. {title} ({files} episode(s))")
    } else {
        format!("{position}. {title}")
    }
}

/// Write the plain text listing.
///
/// # Errors
///
/// Returns `OutputError::Io` if writing fails.
pub fn write_catalog_text(
    catalog: &Catalog,
    meta: &ReportMeta,
    out: &mut dyn Write,
) -> Result<(), OutputError> {
    let kind = catalog.kind();
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out, "{rule}")?;
    writeln!(out, "{}", kind.title())?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Generated: {}", meta.timestamp())?;
    writeln!(out, "Total {}: {}", kind.noun(), catalog.len())?;
    if kind.counts_files() {
        writeln!(out, "Total episodes: {}", catalog.total_files())?;
    }
    writeln!(out, "{rule}")?;
    writeln!(out)?;

    for (idx, (title, files)) in catalog.iter().enumerate() {
        writeln!(out, "{}", title_line(catalog, idx + 1, title, files.len()))?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;
        for file in files {
            writeln!(out, "   • {file}")?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{rule}")?;
    if kind.counts_files() {
        writeln!(
            out,
            "Total: {} series | {} episode(s) listed",
            catalog.len(),
            catalog.total_files()
        )?;
    } else {
        writeln!(out, "Total: {} movie(s) listed", catalog.len())?;
    }
    writeln!(out, "{rule}")?;
    Ok(())
}

/// Build the PDF listing. Unlike the duplicate report it is never truncated.
#[cfg(feature = "pdf")]
#[must_use]
pub fn build_catalog_pdf(catalog: &Catalog, meta: &ReportMeta) -> PdfDocument {
    let kind = catalog.kind();
    let mut doc = PdfDocument::new(kind.title());

    doc.push(TextStyle::Title, kind.title());
    let info = if kind.counts_files() {
        format!(
            "{} | {} series | {} episode(s)",
            meta.short_timestamp(),
            catalog.len(),
            catalog.total_files()
        )
    } else {
        format!("{} | Total: {} movie(s)", meta.short_timestamp(), catalog.len())
    };
    doc.push(TextStyle::Info, info);
    doc.spacer(5.67);

    for (idx, (title, files)) in catalog.iter().enumerate() {
        doc.push(TextStyle::Heading, title_line(catalog, idx + 1, title, files.len()));
        for file in files {
            doc.push(TextStyle::Body, format!("• {file}"));
        }
    }

    doc
}

/// Write a listing in `format` to `path`, replacing any existing file.
///
/// # Errors
///
/// - [`OutputError::Unsupported`] for CSV, which listings do not offer
/// - [`OutputError::MissingDependency`] for PDF without the `pdf` feature
/// - [`OutputError::Write`] if the file cannot be written
pub fn write_catalog(
    catalog: &Catalog,
    format: ReportFormat,
    meta: &ReportMeta,
    path: &Path,
) -> Result<(), OutputError> {
    match format {
        ReportFormat::Text => write_file(path, |out| write_catalog_text(catalog, meta, out)),
        ReportFormat::Csv => Err(OutputError::Unsupported {
            format,
            report: "title listings",
        }),
        #[cfg(feature = "pdf")]
        ReportFormat::Pdf => {
            let bytes = build_catalog_pdf(catalog, meta).render();
            write_file(path, |out| Ok(out.write_all(&bytes)?))
        }
        #[cfg(not(feature = "pdf"))]
        ReportFormat::Pdf => Err(OutputError::MissingDependency(format)),
    }
}

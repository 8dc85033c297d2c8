//! CSV output formatter for duplicate scan results.
//!
//! Provides a spreadsheet-friendly export with one row per duplicate copy.
//! The file starts with a UTF-8 byte-order mark, uses `;` as the field
//! delimiter and quotes every field, which is what spreadsheet programs
//! configured for comma decimal separators expect.
//!
//! # Columns
//!
//! - `Type`: Always `By Name`
//! - `Group`: `Name-<n>`, numbered in ascending name order
//! - `File Name`: File name with its original casing
//! - `Full Path`: Path to the copy
//! - `Folder`: Title folder holding the copy
//! - `Size (bytes)`: Size in bytes
//! - `Size (formatted)`: Human-readable size
//! - `Total Copies`: Number of copies in the group

use std::io::Write;

use csv::{QuoteStyle, WriterBuilder};
use serde::Serialize;

use super::{format_size, OutputError, ReportFormat, ReportMeta, ReportRenderer};
use crate::duplicates::DuplicateIndex;

/// UTF-8 byte-order mark written before the header row.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Column names, in order.
pub const CSV_HEADER: [&str; 8] = [
    "Type",
    "Group",
    "File Name",
    "Full Path",
    "Folder",
    "Size (bytes)",
    "Size (formatted)",
    "Total Copies",
];

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    kind: &'static str,
    group: String,
    file_name: &'a str,
    full_path: String,
    folder: &'a str,
    size: u64,
    size_formatted: String,
    total_copies: usize,
}

/// CSV output formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvReport;

impl CsvReport {
    /// Create a new CSV formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ReportRenderer for CsvReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Csv
    }

    fn render(
        &self,
        index: &DuplicateIndex,
        _meta: &ReportMeta,
        out: &mut dyn Write,
    ) -> Result<(), OutputError> {
        out.write_all(UTF8_BOM)?;

        let mut csv_writer = WriterBuilder::new()
            .delimiter(b';')
            .quote_style(QuoteStyle::Always)
            .has_headers(false)
            .from_writer(out);

        csv_writer.write_record(CSV_HEADER)?;

        let mut rows = 0usize;
        for (idx, group) in index.iter().enumerate() {
            let group_id = format!("Name-{}", idx + 1);

            for member in &group.members {
                let row = CsvRow {
                    kind: "By Name",
                    group: group_id.clone(),
                    file_name: &member.file_name,
                    full_path: member.path.to_string_lossy().into_owned(),
                    folder: &member.parent_folder,
                    size: member.size_bytes,
                    size_formatted: format_size(member.size_bytes),
                    total_copies: group.len(),
                };
                csv_writer.serialize(row)?;
                rows += 1;
            }
        }

        csv_writer.flush()?;
        log::debug!("Wrote {} CSV row(s)", rows);
        Ok(())
    }
}

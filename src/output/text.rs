//! Plain text report.
//!
//! Lists every duplicate group in ascending name order with the folder,
//! path and size of each copy, followed by the copy count and the space
//! taken by the extra copies.

use std::io::Write;

use super::{format_size, OutputError, ReportFormat, ReportMeta, ReportRenderer, RULE_WIDTH};
use crate::duplicates::{DuplicateGroup, DuplicateIndex};

/// Plain text report formatter.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextReport;

impl TextReport {
    /// Create a new text formatter.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn write_group(
        out: &mut dyn Write,
        position: usize,
        group: &DuplicateGroup,
    ) -> Result<(), OutputError> {
        writeln!(out, "{}. {}", position, group.key)?;
        writeln!(out, "{}", "-".repeat(RULE_WIDTH))?;

        for member in &group.members {
            let name = member
                .path
                .file_name()
                .map_or_else(|| member.file_name.clone(), |n| n.to_string_lossy().into_owned());
            writeln!(out, "   • {} / {}", member.parent_folder, name)?;
            writeln!(out, "     Path: {}", member.path.display())?;
            writeln!(out, "     Size: {}", format_size(member.size_bytes))?;
        }

        writeln!(out)?;
        writeln!(out, "   Total copies: {}", group.len())?;
        writeln!(out, "   Wasted space: {}", format_size(group.wasted_space()))?;
        writeln!(out)?;
        Ok(())
    }
}

impl ReportRenderer for TextReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Text
    }

    fn render(
        &self,
        index: &DuplicateIndex,
        meta: &ReportMeta,
        out: &mut dyn Write,
    ) -> Result<(), OutputError> {
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(out, "{rule}")?;
        writeln!(out, "DUPLICATE FILES REPORT")?;
        writeln!(out, "{rule}")?;
        writeln!(out, "Generated: {}", meta.timestamp())?;
        writeln!(out, "Duplicate groups by name: {}", index.len())?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        writeln!(out, "{rule}")?;
        writeln!(out, "DUPLICATES BY FILE NAME")?;
        writeln!(out, "{rule}")?;
        writeln!(out)?;

        if index.is_empty() {
            writeln!(out, "No duplicate files found by name.")?;
            writeln!(out)?;
        } else {
            for (idx, group) in index.iter().enumerate() {
                Self::write_group(out, idx + 1, group)?;
            }
        }

        writeln!(out, "{rule}")?;
        writeln!(out, "END OF REPORT")?;
        writeln!(out, "{rule}")?;
        Ok(())
    }
}

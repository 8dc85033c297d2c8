//! PDF output using pdf-writer.
//!
//! # Overview
//!
//! [`PdfDocument`] is a minimal flow layout: a list of styled text blocks
//! placed top to bottom on A4 pages with 1 cm margins, wrapped at an
//! estimated character width and broken onto new pages as needed. Text is
//! set in the standard Helvetica faces with WinAnsi encoding, so no font
//! has to be embedded; characters outside that encoding print as `?`.
//!
//! [`PdfReport`] builds such a document from a duplicate index. To keep the
//! file small it shows only the first `max_groups` groups and the first
//! `max_examples` copies of each.

use std::io::Write;

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str, TextStr};

use super::{format_size, OutputError, ReportFormat, ReportMeta, ReportRenderer};
use crate::duplicates::DuplicateIndex;

const PAGE_WIDTH: f32 = 595.28;
const PAGE_HEIGHT: f32 = 841.89;
/// One centimetre in points.
const MARGIN: f32 = 28.35;
const LINE_SPACING: f32 = 1.2;
/// Rough average Helvetica glyph width, as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const REGULAR_FONT: Name<'static> = Name(b"F1");
const BOLD_FONT: Name<'static> = Name(b"F2");

/// Visual style of a text block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextStyle {
    /// Centered document title
    Title,
    /// Centered grey summary line
    Info,
    /// Bold section or item heading
    Heading,
    /// Indented body text
    Body,
}

struct StyleSpec {
    size: f32,
    bold: bool,
    centered: bool,
    indent: f32,
    space_before: f32,
    space_after: f32,
    color: (f32, f32, f32),
}

impl TextStyle {
    fn spec(self) -> StyleSpec {
        match self {
            Self::Title => StyleSpec {
                size: 12.0,
                bold: true,
                centered: true,
                indent: 0.0,
                space_before: 0.0,
                space_after: 8.0,
                color: rgb(0x1a, 0x1a, 0x1a),
            },
            Self::Info => StyleSpec {
                size: 7.0,
                bold: false,
                centered: true,
                indent: 0.0,
                space_before: 0.0,
                space_after: 6.0,
                color: rgb(0x7f, 0x8c, 0x8d),
            },
            Self::Heading => StyleSpec {
                size: 9.0,
                bold: true,
                centered: false,
                indent: 0.0,
                space_before: 4.0,
                space_after: 2.0,
                color: rgb(0x2c, 0x3e, 0x50),
            },
            Self::Body => StyleSpec {
                size: 7.0,
                bold: false,
                centered: false,
                indent: 10.0,
                space_before: 0.0,
                space_after: 1.0,
                color: rgb(0x34, 0x49, 0x5e),
            },
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    (f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
}

#[derive(Debug, Clone, PartialEq)]
enum Block {
    Text(TextStyle, String),
    Spacer(f32),
}

/// A flowing document of styled text blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfDocument {
    title: String,
    blocks: Vec<Block>,
}

impl PdfDocument {
    /// Create an empty document. `title` goes into the document metadata.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Append a text block.
    pub fn push(&mut self, style: TextStyle, text: impl Into<String>) {
        self.blocks.push(Block::Text(style, text.into()));
    }

    /// Append vertical space, in points.
    pub fn spacer(&mut self, height: f32) {
        self.blocks.push(Block::Spacer(height));
    }

    /// Text blocks in document order.
    pub fn texts(&self) -> impl Iterator<Item = (TextStyle, &str)> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Text(style, text) => Some((*style, text.as_str())),
            Block::Spacer(_) => None,
        })
    }

    /// Lay out the blocks and serialize the PDF file.
    #[must_use]
    pub fn render(&self) -> Vec<u8> {
        let pages = self.layout();

        let mut pdf = Pdf::new();
        let mut next_id = 1;
        let mut alloc = || {
            let id = Ref::new(next_id);
            next_id += 1;
            id
        };

        let catalog_id = alloc();
        let tree_id = alloc();
        let regular_id = alloc();
        let bold_id = alloc();
        let info_id = alloc();
        let page_ids: Vec<(Ref, Ref)> = pages.iter().map(|_| (alloc(), alloc())).collect();

        pdf.catalog(catalog_id).pages(tree_id);
        pdf.pages(tree_id)
            .kids(page_ids.iter().map(|(page_id, _)| *page_id))
            .count(page_ids.len() as i32);
        pdf.type1_font(regular_id)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(bold_id)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.document_info(info_id)
            .title(TextStr(&self.title))
            .producer(TextStr("mediadupe"));

        for (content, (page_id, content_id)) in pages.into_iter().zip(page_ids.iter().copied()) {
            {
                let mut page = pdf.page(page_id);
                page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
                page.parent(tree_id);
                page.contents(content_id);
                page.resources()
                    .fonts()
                    .pair(REGULAR_FONT, regular_id)
                    .pair(BOLD_FONT, bold_id);
            }
            pdf.stream(content_id, &content.finish());
        }

        pdf.finish()
    }

    /// Place every line, starting a new page whenever the next one would
    /// cross the bottom margin. Always yields at least one page.
    fn layout(&self) -> Vec<Content> {
        let usable_width = PAGE_WIDTH - 2.0 * MARGIN;
        let mut pages = vec![Content::new()];
        let mut y = PAGE_HEIGHT - MARGIN;

        for block in &self.blocks {
            match block {
                Block::Spacer(height) => y -= height,
                Block::Text(style, text) => {
                    let spec = style.spec();
                    let line_height = spec.size * LINE_SPACING;
                    let max_chars =
                        ((usable_width - spec.indent) / (spec.size * AVG_GLYPH_WIDTH)) as usize;
                    y -= spec.space_before;

                    for line in wrap(text, max_chars.max(1)) {
                        if y - line_height < MARGIN {
                            pages.push(Content::new());
                            y = PAGE_HEIGHT - MARGIN;
                        }
                        y -= line_height;

                        let x = if spec.centered {
                            let width = line.chars().count() as f32 * spec.size * AVG_GLYPH_WIDTH;
                            ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
                        } else {
                            MARGIN + spec.indent
                        };

                        let font = if spec.bold { BOLD_FONT } else { REGULAR_FONT };
                        let (r, g, b) = spec.color;
                        let encoded = encode_win_ansi(&line);
                        if let Some(content) = pages.last_mut() {
                            content.set_fill_rgb(r, g, b);
                            content.begin_text();
                            content.set_font(font, spec.size);
                            content.next_line(x, y);
                            content.show(Str(&encoded));
                            content.end_text();
                        }
                    }

                    y -= spec.space_after;
                }
            }
        }

        pages
    }
}

/// Split `text` into lines of at most `max_chars` characters, breaking at
/// spaces where possible.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let mut word: Vec<char> = word.chars().collect();

        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(max_chars);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let current_len = current.chars().count();
        if current_len > 0 && current_len + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Encode text for a WinAnsi (Windows-1252) Type 1 font.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{A0}'..='\u{FF}' => c as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            '„' => 0x84,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            _ => b'?',
        })
        .collect()
}

/// PDF report formatter.
#[derive(Debug, Clone, Copy)]
pub struct PdfReport {
    max_groups: usize,
    max_examples: usize,
}

impl Default for PdfReport {
    fn default() -> Self {
        Self::new(super::DEFAULT_PDF_MAX_GROUPS, super::DEFAULT_PDF_MAX_EXAMPLES)
    }
}

impl PdfReport {
    /// Create a PDF formatter showing at most `max_groups` groups and
    /// `max_examples` copies per group.
    #[must_use]
    pub fn new(max_groups: usize, max_examples: usize) -> Self {
        Self {
            max_groups,
            max_examples,
        }
    }

    /// Build the document for `index` without serializing it.
    #[must_use]
    pub fn build_document(&self, index: &DuplicateIndex, meta: &ReportMeta) -> PdfDocument {
        let mut doc = PdfDocument::new("Duplicate Files Report");

        doc.push(TextStyle::Title, "DUPLICATE FILES REPORT");
        doc.push(
            TextStyle::Info,
            format!(
                "{} | Duplicate groups by name: {}",
                meta.short_timestamp(),
                index.len()
            ),
        );
        doc.spacer(5.67);
        doc.push(TextStyle::Heading, "DUPLICATES BY NAME");

        if index.is_empty() {
            doc.push(TextStyle::Body, "No duplicate files found by name.");
            return doc;
        }

        for (idx, group) in index.iter().take(self.max_groups).enumerate() {
            doc.push(
                TextStyle::Heading,
                format!("{}. {} ({} copies)", idx + 1, group.key, group.len()),
            );
            for member in group.members.iter().take(self.max_examples) {
                doc.push(
                    TextStyle::Body,
                    format!(
                        "• {} / {} ({})",
                        member.parent_folder,
                        member.file_name,
                        format_size(member.size_bytes)
                    ),
                );
            }
            if group.len() > self.max_examples {
                doc.push(
                    TextStyle::Body,
                    format!("... and {} more copies", group.len() - self.max_examples),
                );
            }
        }

        if index.len() > self.max_groups {
            log::debug!(
                "PDF report limited to {} of {} groups",
                self.max_groups,
                index.len()
            );
        }

        doc
    }
}

impl ReportRenderer for PdfReport {
    fn format(&self) -> ReportFormat {
        ReportFormat::Pdf
    }

    fn render(
        &self,
        index: &DuplicateIndex,
        meta: &ReportMeta,
        out: &mut dyn Write,
    ) -> Result<(), OutputError> {
        let bytes = self.build_document(index, meta).render();
        out.write_all(&bytes)?;
        Ok(())
    }
}

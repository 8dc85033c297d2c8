//! Title listings for a single media library.
//!
//! A [`Catalog`] groups the video files of one base directory by title
//! folder: every folder holding at least one video becomes an entry, and
//! both folders and files are sorted by name. Movie and series libraries
//! share the same structure and differ only in wording and in whether
//! per-title file counts are shown (see [`CatalogKind`]).
//!
//! # Example
//!
//! ```no_run
//! use mediadupe::catalog::{Catalog, CatalogKind};
//! use mediadupe::scanner::{MissingDirectoryPolicy, Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let config = ScannerConfig::default().with_missing_directory(MissingDirectoryPolicy::Fail);
//! let outcome = Scanner::new(config).scan(Path::new("/media/TV")).unwrap();
//! let catalog = Catalog::from_outcome(CatalogKind::Series, &outcome);
//! println!("{} series, {} episodes", catalog.len(), catalog.total_files());
//! ```

pub mod report;

use std::collections::BTreeMap;

use crate::output::ReportFormat;
use crate::scanner::{FileRecord, ScanOutcome};

pub use report::{write_catalog, write_catalog_text};

/// Which library a catalog describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    /// One folder per movie
    Movies,
    /// One folder per series, files are episodes
    Series,
}

impl CatalogKind {
    /// Report title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Movies => "LIST OF MOVIES",
            Self::Series => "LIST OF SERIES",
        }
    }

    /// Plural noun for the titles.
    #[must_use]
    pub fn noun(self) -> &'static str {
        match self {
            Self::Movies => "movies",
            Self::Series => "series",
        }
    }

    /// Default file name of the listing in `format`.
    #[must_use]
    pub fn default_file_name(self, format: ReportFormat) -> String {
        let stem = match self {
            Self::Movies => "lista_filmes",
            Self::Series => "lista_series",
        };
        format!("{}.{}", stem, format.extension())
    }

    /// Whether per-title file counts and an episode total are shown.
    #[must_use]
    pub fn counts_files(self) -> bool {
        matches!(self, Self::Series)
    }
}

/// Video files of one library, keyed by title folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    kind: CatalogKind,
    titles: BTreeMap<String, Vec<String>>,
}

impl Catalog {
    /// Build a catalog from scanned records.
    #[must_use]
    pub fn from_records<'a>(
        kind: CatalogKind,
        records: impl IntoIterator<Item = &'a FileRecord>,
    ) -> Self {
        let mut titles: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for record in records {
            titles
                .entry(record.parent_folder.clone())
                .or_default()
                .push(record.file_name.clone());
        }
        for files in titles.values_mut() {
            files.sort();
        }
        Self { kind, titles }
    }

    /// Build a catalog from a scan outcome.
    #[must_use]
    pub fn from_outcome(kind: CatalogKind, outcome: &ScanOutcome) -> Self {
        Self::from_records(kind, &outcome.records)
    }

    /// The library kind.
    #[must_use]
    pub fn kind(&self) -> CatalogKind {
        self.kind
    }

    /// Number of titles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// Check if no titles were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Number of video files across all titles.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.titles.values().map(Vec::len).sum()
    }

    /// Titles and their files, in ascending title order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.titles
            .iter()
            .map(|(title, files)| (title.as_str(), files.as_slice()))
    }
}

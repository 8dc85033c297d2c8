//! Run configuration.
//!
//! There are no configuration files: every setting comes from a CLI flag,
//! falling back to an environment variable and then to the hardcoded
//! defaults below. The `*Config` structs are the resolved, CLI-independent
//! settings the pipelines in `lib.rs` run with.

use std::path::{Path, PathBuf};

use crate::catalog::CatalogKind;
use crate::cli::{DuplicatesArgs, ListOutputArgs, MoviesArgs, SeriesArgs};
use crate::output::{ReportFormat, ReportOptions};

/// Movie library used when neither `--movies`/`--dir` nor the environment is set.
pub const DEFAULT_MOVIES_DIR: &str = r"Y:\Mídia\Filmes";
/// Series library used when neither `--series`/`--dir` nor the environment is set.
pub const DEFAULT_SERIES_DIR: &str = r"Y:\Mídia\TV";
/// Reports land in the working directory by default.
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Environment variable overriding the movie library.
pub const MOVIES_DIR_ENV: &str = "MEDIADUPE_MOVIES_DIR";
/// Environment variable overriding the series library.
pub const SERIES_DIR_ENV: &str = "MEDIADUPE_SERIES_DIR";

/// Settings for a duplicate report run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicatesConfig {
    /// Movie library
    pub movies_dir: PathBuf,
    /// Series library
    pub series_dir: PathBuf,
    /// Where reports are written
    pub output_dir: PathBuf,
    /// Formats to write, in writing order, without repeats
    pub formats: Vec<ReportFormat>,
    /// PDF limits
    pub report: ReportOptions,
}

impl DuplicatesConfig {
    /// Resolve the settings of a `duplicates` invocation.
    #[must_use]
    pub fn from_args(args: &DuplicatesArgs) -> Self {
        Self {
            movies_dir: args.movies.clone(),
            series_dir: args.series.clone(),
            output_dir: args.output_dir.clone(),
            formats: normalize_formats(
                args.format.iter().copied().map(ReportFormat::from),
                &ReportFormat::ALL,
            ),
            report: ReportOptions {
                pdf_max_groups: args.pdf_max_groups,
                pdf_max_examples: args.pdf_max_examples,
            },
        }
    }

    /// Destination of the report in `format`.
    #[must_use]
    pub fn output_path(&self, format: ReportFormat) -> PathBuf {
        self.output_dir.join(format.default_file_name())
    }
}

/// Settings for a title listing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    /// Movies or series
    pub kind: CatalogKind,
    /// Library to list
    pub dir: PathBuf,
    /// Where listings are written
    pub output_dir: PathBuf,
    /// Formats to write, in writing order, without repeats
    pub formats: Vec<ReportFormat>,
}

impl ListingConfig {
    /// Formats a listing can be written in.
    pub const FORMATS: [ReportFormat; 2] = [ReportFormat::Text, ReportFormat::Pdf];

    /// Resolve the settings of a `movies` invocation.
    #[must_use]
    pub fn movies(args: &MoviesArgs) -> Self {
        Self::new(CatalogKind::Movies, &args.dir, &args.output)
    }

    /// Resolve the settings of a `series` invocation.
    #[must_use]
    pub fn series(args: &SeriesArgs) -> Self {
        Self::new(CatalogKind::Series, &args.dir, &args.output)
    }

    fn new(kind: CatalogKind, dir: &Path, output: &ListOutputArgs) -> Self {
        Self {
            kind,
            dir: dir.to_path_buf(),
            output_dir: output.output_dir.clone(),
            formats: normalize_formats(
                output.format.iter().copied().map(ReportFormat::from),
                &Self::FORMATS,
            ),
        }
    }

    /// Destination of the listing in `format`.
    #[must_use]
    pub fn output_path(&self, format: ReportFormat) -> PathBuf {
        self.output_dir.join(self.kind.default_file_name(format))
    }
}

/// Requested formats in canonical order (txt, csv, pdf) with repeats removed.
/// Nothing requested means everything in `all`.
fn normalize_formats(
    requested: impl IntoIterator<Item = ReportFormat>,
    all: &[ReportFormat],
) -> Vec<ReportFormat> {
    let mut formats: Vec<ReportFormat> = requested.into_iter().collect();
    if formats.is_empty() {
        return all.to_vec();
    }
    formats.sort();
    formats.dedup();
    formats
}

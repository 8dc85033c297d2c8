//! mediadupe - duplicate video finder for media libraries
//!
//! Scans a movie library and a series library (one folder per title, one
//! level deep), groups video files that share a file name regardless of
//! case, and writes the groups as text, CSV and PDF reports. The same
//! scanner also produces plain title listings of a single library.
//!
//! The binary is a thin wrapper around [`run_app`]; the pipelines are also
//! available as [`find_duplicates`] and [`list_titles`] for embedding.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod console;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod scanner;
pub mod signal;

use std::fs;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};

use crate::catalog::{write_catalog, Catalog};
use crate::cli::{Cli, Commands};
use crate::config::{DuplicatesConfig, ListingConfig};
use crate::console::Console;
use crate::duplicates::NameGrouper;
use crate::error::{AppError, ExitCode};
use crate::output::{
    format_size, write_report, OutputError, ReportFormat, ReportMeta, ReportRegistry,
};
use crate::progress::{NoopProgress, Progress, ProgressCallback};
use crate::scanner::{MissingDirectoryPolicy, ScanOutcome, Scanner, ScannerConfig};

/// Shared state handed to a pipeline run.
#[derive(Clone)]
pub struct RunContext {
    /// Set by the Ctrl+C handler
    pub shutdown: Arc<AtomicBool>,
    /// Receives scan and grouping progress
    pub progress: Arc<dyn ProgressCallback>,
}

impl RunContext {
    /// Context with a fresh shutdown flag and no progress display.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            progress: Arc::new(NoopProgress),
        }
    }

    fn scanner(&self, policy: MissingDirectoryPolicy) -> Scanner {
        Scanner::new(ScannerConfig::default().with_missing_directory(policy))
            .with_shutdown_flag(Arc::clone(&self.shutdown))
            .with_progress_callback(Arc::clone(&self.progress))
    }

    fn check_interrupted(&self) -> Result<()> {
        if self.shutdown.load(Ordering::SeqCst) {
            return Err(AppError::Interrupted.into());
        }
        Ok(())
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

/// Run the command described by `cli`, printing status to stdout.
///
/// # Errors
///
/// Returns an error if a base directory is missing, scanning or writing
/// fails, or the user interrupts the run. Map it with
/// [`ExitCode::for_error`].
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    let color = !cli.no_color && std::io::stdout().is_terminal();
    let mut console = Console::stdout(cli.quiet, color);
    run_app_with_console(cli, &mut console)
}

/// Like [`run_app`], with status lines going to `console`.
///
/// # Errors
///
/// See [`run_app`].
pub fn run_app_with_console(cli: Cli, console: &mut Console) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);

    let handler = signal::install_handler().context("Failed to set up Ctrl+C handling")?;
    let ctx = RunContext {
        shutdown: handler.get_flag(),
        progress: Arc::new(Progress::new(cli.quiet)),
    };

    match &cli.command {
        Commands::Duplicates(args) => {
            find_duplicates(&DuplicatesConfig::from_args(args), &ctx, console)
        }
        Commands::Movies(args) => list_titles(&ListingConfig::movies(args), &ctx, console),
        Commands::Series(args) => list_titles(&ListingConfig::series(args), &ctx, console),
    }
}

/// Scan both libraries, group files by name and write the reports.
///
/// Both base directories are checked before anything is scanned; if either
/// is missing no report is written. A format that is not available in this
/// build is skipped with a warning. A report that cannot be written aborts
/// the remaining formats.
///
/// # Errors
///
/// - [`AppError::MissingDirectory`] if a base directory does not exist
/// - scan, grouping or write failures, with context
/// - [`AppError::Interrupted`] if Ctrl+C was pressed between formats
pub fn find_duplicates(
    config: &DuplicatesConfig,
    ctx: &RunContext,
    console: &mut Console,
) -> Result<ExitCode> {
    console.banner("DUPLICATE FILE FINDER");
    console.line("");
    console.line("Checking directories...");
    console.line(format!("  Movies: {}", config.movies_dir.display()));
    console.line(format!("  Series: {}", config.series_dir.display()));
    require_directory("Movies", &config.movies_dir)?;
    require_directory("Series", &config.series_dir)?;
    console.ok("Directories found");

    console.step(1, 4, "Scanning files...");
    let scanner = ctx.scanner(MissingDirectoryPolicy::Skip);
    let movies = scan_library(&scanner, "movie", &config.movies_dir, console)?;
    let series = scan_library(&scanner, "series", &config.series_dir, console)?;

    let total = movies.len() + series.len();
    if total == 0 {
        console.warn("No video files found in the given directories.");
        return Ok(ExitCode::NoDuplicates);
    }
    console.ok(format!("Total files scanned: {total}"));
    console.line(format!("       - Movies: {}", movies.len()));
    console.line(format!("       - Series: {}", series.len()));

    console.step(2, 4, "Looking for duplicates by name...");
    let index = NameGrouper::new()
        .with_shutdown_flag(Arc::clone(&ctx.shutdown))
        .with_progress_callback(Arc::clone(&ctx.progress))
        .group(&[&movies.records, &series.records])
        .context("Grouping by name failed")?;
    console.ok(format!("{} duplicated name(s) found", index.len()));

    console.step(3, 4, "Exporting results...");
    let started = Instant::now();
    create_output_dir(&config.output_dir)?;
    let registry = ReportRegistry::available(&config.report);
    let meta = ReportMeta::now();

    for &format in &config.formats {
        ctx.check_interrupted()?;

        let renderer = match registry.get(format) {
            Ok(renderer) => renderer,
            Err(err @ OutputError::MissingDependency(_)) => {
                log::warn!("Skipping {} report: {}", format, err);
                console.warn(format!("{} report not generated: {err}", format_label(format)));
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        let path = config.output_path(format);
        write_report(renderer, &index, &meta, &path)
            .with_context(|| format!("Failed to write {} report", format))?;
        console.ok(format!("{} saved to {}", format_label(format), path.display()));
    }
    console.ok(format!(
        "Export finished in {:.1}s",
        started.elapsed().as_secs_f64()
    ));

    console.step(4, 4, "Summary");
    console.banner("SUMMARY");
    console.line(format!("Total files analysed: {total}"));
    console.line(format!("Duplicates by name: {}", index.len()));
    console.line(format!("Files involved: {}", index.total_files()));
    console.line(format!(
        "Wasted space: {}",
        format_size(index.total_wasted_space())
    ));
    console.banner("Done!");

    let warned = movies.has_warnings() || series.has_warnings();
    Ok(if index.is_empty() {
        ExitCode::NoDuplicates
    } else if warned {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    })
}

/// Scan one library and write its title listing.
///
/// # Errors
///
/// - `ScanError::NotFound` (wrapped) if the library does not exist
/// - write failures, with context
/// - [`AppError::Interrupted`] if Ctrl+C was pressed between formats
pub fn list_titles(
    config: &ListingConfig,
    ctx: &RunContext,
    console: &mut Console,
) -> Result<ExitCode> {
    let kind = config.kind;
    console.banner(kind.title());

    let scanner = ctx.scanner(MissingDirectoryPolicy::Fail);
    let outcome = scan_library(&scanner, kind.noun(), &config.dir, console)?;
    let catalog = Catalog::from_outcome(kind, &outcome);

    if catalog.is_empty() {
        console.warn(format!("No {} found in the given directory.", kind.noun()));
        return Ok(ExitCode::NoDuplicates);
    }
    console.ok(format!("Total {} found: {}", kind.noun(), catalog.len()));
    if kind.counts_files() {
        console.ok(format!("Total episodes: {}", catalog.total_files()));
    }

    create_output_dir(&config.output_dir)?;
    let meta = ReportMeta::now();
    for &format in &config.formats {
        ctx.check_interrupted()?;

        let path = config.output_path(format);
        match write_catalog(&catalog, format, &meta, &path) {
            Ok(()) => console.ok(format!("{} saved to {}", format_label(format), path.display())),
            Err(err @ OutputError::MissingDependency(_)) => {
                log::warn!("Skipping {} listing: {}", format, err);
                console.warn(format!("{} listing not generated: {err}", format_label(format)));
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to write {} listing", format));
            }
        }
    }

    console.banner("Done!");
    Ok(if outcome.has_warnings() {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    })
}

fn format_label(format: ReportFormat) -> String {
    format.extension().to_uppercase()
}

fn require_directory(label: &'static str, path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AppError::MissingDirectory {
            label,
            path: path.to_path_buf(),
        }
        .into());
    }
    Ok(())
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Cannot create output directory {}", dir.display()))
}

fn scan_library(
    scanner: &Scanner,
    label: &str,
    dir: &Path,
    console: &mut Console,
) -> Result<ScanOutcome> {
    console.line(format!("Scanning {label} library: {}", dir.display()));
    let outcome = scanner
        .scan(dir)
        .with_context(|| format!("Failed to scan {label} library"))?;

    for warning in &outcome.warnings {
        console.warn(warning.to_string());
    }
    console.ok(format!(
        "{} file(s) in {} folder(s)",
        outcome.len(),
        outcome.folders_scanned
    ));
    Ok(outcome)
}

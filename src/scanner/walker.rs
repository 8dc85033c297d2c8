//! Base directory scanner using walkdir.
//!
//! # Overview
//!
//! A media base directory holds one folder per title (a movie or a series).
//! The [`Scanner`] lists those title folders, then lists the files directly
//! inside each of them and keeps the ones the classifier recognises as
//! video. Nothing deeper than that is visited.
//!
//! Failures on individual folders or files are recorded as
//! [`ScanWarning`]s and skipped. Problems with the base directory itself
//! follow the [`MissingDirectoryPolicy`]: a warning with an empty outcome,
//! or a fatal [`ScanError`].
//!
//! # Example
//!
//! ```no_run
//! use mediadupe::scanner::{MissingDirectoryPolicy, Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let config = ScannerConfig::default().with_missing_directory(MissingDirectoryPolicy::Fail);
//! let outcome = Scanner::new(config).scan(Path::new("/media/TV")).unwrap();
//! println!("{} episodes in {} folders", outcome.len(), outcome.folders_scanned);
//! ```

use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use walkdir::WalkDir;

use super::classifier::is_video_file;
use super::{FileRecord, MissingDirectoryPolicy, ScanError, ScanOutcome, ScanWarning, ScannerConfig};
use crate::progress::{ProgressCallback, PHASE_SCANNING};

/// Scanner for a single media base directory.
pub struct Scanner {
    config: ScannerConfig,
    /// Optional shutdown flag for graceful termination
    shutdown_flag: Option<Arc<AtomicBool>>,
    /// Optional progress callback
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl std::fmt::Debug for Scanner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scanner")
            .field("config", &self.config)
            .field("shutdown_flag", &self.shutdown_flag)
            .field("progress", &self.progress.as_ref().map(|_| "<callback>"))
            .finish()
    }
}

impl Scanner {
    /// Create a new scanner.
    #[must_use]
    pub fn new(config: ScannerConfig) -> Self {
        Self {
            config,
            shutdown_flag: None,
            progress: None,
        }
    }

    /// Set the shutdown flag for graceful termination.
    ///
    /// The flag is checked between title folders.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    /// Set the progress callback.
    #[must_use]
    pub fn with_progress_callback(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = Some(callback);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }

    /// Scan `base` and return every video file found one level below it.
    ///
    /// # Errors
    ///
    /// With [`MissingDirectoryPolicy::Fail`]:
    ///
    /// - [`ScanError::NotFound`] if `base` is missing
    /// - [`ScanError::NotADirectory`] if `base` is a file
    /// - [`ScanError::PermissionDenied`] / [`ScanError::Io`] if `base`
    ///   cannot be listed
    ///
    /// With either policy, [`ScanError::Interrupted`] if the shutdown flag
    /// was raised.
    pub fn scan(&self, base: &Path) -> Result<ScanOutcome, ScanError> {
        let mut outcome = ScanOutcome::new(base);

        let listed = match std::fs::metadata(base) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ScanError::NotFound(base.to_path_buf()))
            }
            Err(e) => Err(base_error(base, e)),
            Ok(meta) if !meta.is_dir() => Err(ScanError::NotADirectory(base.to_path_buf())),
            Ok(_) => self.list_folders(base, &mut outcome),
        };
        let folders = match listed {
            Ok(folders) => folders,
            Err(err) => return self.skip_base(base, err, outcome),
        };

        let total = folders.len();
        log::info!("Scanning {} folder(s) in {}", total, base.display());

        let started = Instant::now();
        if let Some(cb) = &self.progress {
            cb.on_phase_start(PHASE_SCANNING, total);
        }

        for (idx, (name, path)) in folders.iter().enumerate() {
            if self.is_shutdown_requested() {
                log::info!("Scan of {} interrupted", base.display());
                return Err(ScanError::Interrupted);
            }

            if let Err(warning) = scan_folder(name, path, &mut outcome) {
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
            }
            outcome.folders_scanned += 1;

            let processed = idx + 1;
            if processed % self.config.progress_interval == 0 || processed == total {
                if let Some(cb) = &self.progress {
                    cb.on_progress(
                        processed,
                        &format!("{} file(s) found", outcome.records.len()),
                    );
                }
            }
        }

        if let Some(cb) = &self.progress {
            cb.on_phase_end(PHASE_SCANNING);
        }
        log::info!(
            "Found {} video file(s) in {} ({:.1}s)",
            outcome.records.len(),
            base.display(),
            started.elapsed().as_secs_f64()
        );

        Ok(outcome)
    }

    /// Apply the missing directory policy to a base-level failure.
    fn skip_base(
        &self,
        base: &Path,
        err: ScanError,
        mut outcome: ScanOutcome,
    ) -> Result<ScanOutcome, ScanError> {
        if self.config.missing_directory == MissingDirectoryPolicy::Fail {
            return Err(err);
        }

        let warning = match err {
            ScanError::NotFound(path) => ScanWarning::MissingDirectory(path),
            ScanError::Io { source, .. } => ScanWarning::BaseUnreadable {
                path: base.to_path_buf(),
                reason: source.to_string(),
            },
            ScanError::NotADirectory(_) => ScanWarning::BaseUnreadable {
                path: base.to_path_buf(),
                reason: "not a directory".to_string(),
            },
            ScanError::PermissionDenied(_) => ScanWarning::BaseUnreadable {
                path: base.to_path_buf(),
                reason: "permission denied".to_string(),
            },
            ScanError::Interrupted => return Err(ScanError::Interrupted),
        };
        log::warn!("{}", warning);
        outcome.warnings.push(warning);
        Ok(outcome)
    }

    /// List the title folders directly under `base`, in iteration order.
    ///
    /// Entries that cannot be inspected become warnings; failing to list
    /// `base` itself is fatal.
    fn list_folders(
        &self,
        base: &Path,
        outcome: &mut ScanOutcome,
    ) -> Result<Vec<(String, PathBuf)>, ScanError> {
        let mut folders = Vec::new();

        for entry in WalkDir::new(base).min_depth(1).max_depth(1).follow_links(true) {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_dir() {
                        let name = entry.file_name().to_string_lossy().into_owned();
                        folders.push((name, entry.into_path()));
                    }
                }
                Err(err) if err.depth() == 0 => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory loop"));
                    return Err(base_error(base, source));
                }
                Err(err) if is_dangling_link(&err) => {
                    log::debug!("Skipping dangling link {}", err.path().unwrap_or(base).display());
                }
                Err(err) => {
                    let warning = ScanWarning::FileUnreadable {
                        path: err.path().unwrap_or(base).to_path_buf(),
                        reason: walk_reason(&err),
                    };
                    log::warn!("{}", warning);
                    outcome.warnings.push(warning);
                }
            }
        }

        Ok(folders)
    }
}

/// Collect the video files of one title folder into `outcome`.
///
/// Returns a warning if the folder itself cannot be listed. Files that
/// cannot be inspected are recorded as warnings and skipped.
fn scan_folder(name: &str, folder: &Path, outcome: &mut ScanOutcome) -> Result<(), ScanWarning> {
    for entry in WalkDir::new(folder).min_depth(1).max_depth(1).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                return Err(ScanWarning::FolderUnreadable {
                    path: folder.to_path_buf(),
                    reason: walk_reason(&err),
                });
            }
            Err(err) if is_dangling_link(&err) => {
                log::debug!("Skipping dangling link {}", err.path().unwrap_or(folder).display());
                continue;
            }
            Err(err) => {
                let warning = ScanWarning::FileUnreadable {
                    path: err.path().unwrap_or(folder).to_path_buf(),
                    reason: walk_reason(&err),
                };
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
                continue;
            }
        };

        if !entry.file_type().is_file() || !is_video_file(entry.path()) {
            continue;
        }

        match entry.metadata() {
            Ok(meta) => {
                log::trace!("Found {}", entry.path().display());
                outcome
                    .records
                    .push(FileRecord::new(entry.into_path(), name, meta.len()));
            }
            Err(err) => {
                let warning = ScanWarning::FileUnreadable {
                    path: entry.into_path(),
                    reason: walk_reason(&err),
                };
                log::warn!("{}", warning);
                outcome.warnings.push(warning);
            }
        }
    }

    Ok(())
}

fn base_error(base: &Path, source: io::Error) -> ScanError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        ScanError::PermissionDenied(base.to_path_buf())
    } else {
        ScanError::Io {
            path: base.to_path_buf(),
            source,
        }
    }
}

/// A symlink whose target no longer exists. Treated like any other entry
/// that is neither a folder nor a file.
fn is_dangling_link(err: &walkdir::Error) -> bool {
    err.path().is_some_and(|path| {
        path.symlink_metadata()
            .is_ok_and(|meta| meta.file_type().is_symlink())
            && !path.exists()
    })
}

fn walk_reason(err: &walkdir::Error) -> String {
    match err.io_error() {
        Some(io_err) => io_err.to_string(),
        None => err.to_string(),
    }
}

//! Scanner module for media library traversal.
//!
//! This module provides functionality for:
//! - Video file classification by extension
//! - One-level traversal of a media base directory
//! - Skip-and-continue handling of unreadable folders and files
//!
//! # Architecture
//!
//! The scanner is divided into submodules:
//! - [`classifier`]: Extension allow-list
//! - [`walker`]: Base directory traversal producing [`FileRecord`]s
//!
//! # Example
//!
//! ```no_run
//! use mediadupe::scanner::{Scanner, ScannerConfig};
//! use std::path::Path;
//!
//! let scanner = Scanner::new(ScannerConfig::default());
//! let outcome = scanner.scan(Path::new("/media/movies")).unwrap();
//! for record in &outcome.records {
//!     println!("{} / {}: {} bytes", record.parent_folder, record.file_name, record.size_bytes);
//! }
//! for warning in &outcome.warnings {
//!     eprintln!("Warning: {}", warning);
//! }
//! ```

pub mod classifier;
pub mod walker;

use std::path::{Path, PathBuf};

// Re-export main types
pub use classifier::{is_video_file, VIDEO_EXTENSIONS};
pub use walker::Scanner;

/// Metadata for one video file found under a base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Full path to the file
    pub full_path: PathBuf,
    /// File name with its original casing
    pub file_name: String,
    /// Name of the title folder directly under the base directory
    pub parent_folder: String,
    /// File size in bytes
    pub size_bytes: u64,
}

impl FileRecord {
    /// Create a new record.
    ///
    /// The file name is taken from the last component of `full_path`.
    #[must_use]
    pub fn new(full_path: PathBuf, parent_folder: impl Into<String>, size_bytes: u64) -> Self {
        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            full_path,
            file_name,
            parent_folder: parent_folder.into(),
            size_bytes,
        }
    }
}

/// What to do when the base directory does not exist or cannot be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingDirectoryPolicy {
    /// Return an empty outcome carrying a [`ScanWarning::MissingDirectory`]
    /// or [`ScanWarning::BaseUnreadable`].
    #[default]
    Skip,
    /// Fail with the matching [`ScanError`].
    Fail,
}

/// Configuration for a base directory scan.
#[derive(Debug, Clone)]
pub struct ScannerConfig {
    /// Behaviour for a missing base directory.
    pub missing_directory: MissingDirectoryPolicy,
    /// Report progress every this many folders (and always on the last one).
    pub progress_interval: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            missing_directory: MissingDirectoryPolicy::Skip,
            progress_interval: 10,
        }
    }
}

impl ScannerConfig {
    /// Set the missing directory policy.
    #[must_use]
    pub fn with_missing_directory(mut self, policy: MissingDirectoryPolicy) -> Self {
        self.missing_directory = policy;
        self
    }

    /// Set the progress interval in folders. Zero is treated as one.
    #[must_use]
    pub fn with_progress_interval(mut self, folders: usize) -> Self {
        self.progress_interval = folders.max(1);
        self
    }
}

/// A non-fatal problem met during a scan. The affected item is skipped.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanWarning {
    /// The base directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// The base path exists but could not be listed.
    #[error("Cannot read directory {}: {reason}", path.display())]
    BaseUnreadable {
        /// Base path that was skipped
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// A title folder could not be listed.
    #[error("Cannot read folder {}: {reason}", path.display())]
    FolderUnreadable {
        /// Folder that was skipped
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },

    /// A file could not be inspected.
    #[error("Cannot access file {}: {reason}", path.display())]
    FileUnreadable {
        /// File that was skipped
        path: PathBuf,
        /// Underlying error message
        reason: String,
    },
}

/// Result of scanning one base directory.
#[derive(Debug, Clone, Default)]
pub struct ScanOutcome {
    /// The scanned base directory
    pub base: PathBuf,
    /// Video files found, in directory iteration order
    pub records: Vec<FileRecord>,
    /// Items skipped along the way
    pub warnings: Vec<ScanWarning>,
    /// Number of title folders visited
    pub folders_scanned: usize,
}

impl ScanOutcome {
    /// Create an empty outcome for `base`.
    #[must_use]
    pub fn new(base: &Path) -> Self {
        Self {
            base: base.to_path_buf(),
            ..Default::default()
        }
    }

    /// Number of records found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if no records were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all record sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.records.iter().map(|r| r.size_bytes).sum()
    }

    /// Check if any item was skipped.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Errors that abort a base directory scan.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// The base directory does not exist.
    #[error("Directory not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The base path exists but is not a directory.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// Permission was denied when listing the base directory.
    #[error("Permission denied: {}", .0.display())]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while listing the base directory.
    #[error("I/O error for {}", path.display())]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The scan was interrupted by the user.
    #[error("Scan interrupted by user")]
    Interrupted,
}

//! Name-based duplicate grouping.
//!
//! # Overview
//!
//! Two video files are considered duplicates when their file names are
//! equal ignoring case. Grouping runs over any number of scan results
//! (typically the movie library followed by the series library), in order,
//! so the member list of each group follows the order the files were found.
//! The first member of a group is the copy that is kept when computing
//! wasted space.
//!
//! # Example
//!
//! ```
//! use mediadupe::duplicates::group_by_name;
//! use mediadupe::scanner::FileRecord;
//! use std::path::PathBuf;
//!
//! let movies = vec![FileRecord::new(PathBuf::from("/movies/A/Heat.mkv"), "A", 100)];
//! let series = vec![
//!     FileRecord::new(PathBuf::from("/tv/B/heat.MKV"), "B", 100),
//!     FileRecord::new(PathBuf::from("/tv/B/other.mkv"), "B", 50),
//! ];
//!
//! let index = group_by_name(&[&movies, &series]);
//!
//! assert_eq!(index.len(), 1);
//! let group = index.get("heat.mkv").unwrap();
//! assert_eq!(group.len(), 2);
//! assert_eq!(group.wasted_space(), 100);
//! ```

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::progress::{ProgressCallback, PHASE_GROUPING};
use crate::scanner::FileRecord;

/// Emit grouping progress at least every this many records.
const PROGRESS_EVERY: usize = 100;
/// Emit grouping progress at least this often.
const PROGRESS_PERIOD: Duration = Duration::from_secs(1);

/// Normalize a file name into its grouping key.
#[must_use]
pub fn normalize_name(file_name: &str) -> String {
    file_name.to_lowercase()
}

/// One copy of a duplicated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMember {
    /// Full path to the copy
    pub path: PathBuf,
    /// File name with its original casing
    pub file_name: String,
    /// Title folder holding the copy
    pub parent_folder: String,
    /// Size in bytes
    pub size_bytes: u64,
}

impl From<&FileRecord> for DuplicateMember {
    fn from(record: &FileRecord) -> Self {
        Self {
            path: record.full_path.clone(),
            file_name: record.file_name.clone(),
            parent_folder: record.parent_folder.clone(),
            size_bytes: record.size_bytes,
        }
    }
}

/// Files sharing a normalized name. Always holds two or more members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateGroup {
    /// Lowercased file name shared by every member
    pub key: String,
    /// Copies in the order they were found
    pub members: Vec<DuplicateMember>,
}

impl DuplicateGroup {
    /// Number of copies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check if the group is empty. Never true for groups in an index.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Total size of all copies.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.members.iter().map(|m| m.size_bytes).sum()
    }

    /// Size of every copy beyond the first one found.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        let first = self.members.first().map_or(0, |m| m.size_bytes);
        self.total_size().saturating_sub(first)
    }
}

/// Duplicate groups keyed by normalized name, iterated in ascending key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DuplicateIndex {
    groups: BTreeMap<String, DuplicateGroup>,
}

impl DuplicateIndex {
    /// Number of duplicate groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no duplicates were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Look up a group by normalized name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&DuplicateGroup> {
        self.groups.get(key)
    }

    /// Groups in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = &DuplicateGroup> {
        self.groups.values()
    }

    /// Total number of files across all groups.
    #[must_use]
    pub fn total_files(&self) -> usize {
        self.groups.values().map(DuplicateGroup::len).sum()
    }

    /// Wasted space summed over all groups.
    #[must_use]
    pub fn total_wasted_space(&self) -> u64 {
        self.groups.values().map(DuplicateGroup::wasted_space).sum()
    }
}

impl<'a> IntoIterator for &'a DuplicateIndex {
    type Item = &'a DuplicateGroup;
    type IntoIter = std::collections::btree_map::Values<'a, String, DuplicateGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.values()
    }
}

/// Errors that can occur during grouping.
#[derive(thiserror::Error, Debug)]
pub enum GroupError {
    /// Grouping was interrupted by the user.
    #[error("Grouping interrupted by user")]
    Interrupted,
}

/// Group records from all collections by case-insensitive file name.
///
/// Collections are read in order, so members of a group appear in the
/// order the files were scanned. Only names seen more than once are kept.
#[must_use]
pub fn group_by_name(collections: &[&[FileRecord]]) -> DuplicateIndex {
    match NameGrouper::new().group(collections) {
        Ok(index) => index,
        // No shutdown flag is set, so grouping cannot be interrupted.
        Err(GroupError::Interrupted) => DuplicateIndex::default(),
    }
}

/// Grouper with optional progress reporting and interruption.
#[derive(Default)]
pub struct NameGrouper {
    shutdown_flag: Option<Arc<AtomicBool>>,
    progress: Option<Arc<dyn ProgressCallback>>,
}

impl NameGrouper {
    /// Create a grouper without progress or shutdown handling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the shutdown flag for graceful termination.
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

    /// Build the duplicate index.
    ///
    /// # Errors
    ///
    /// Returns [`GroupError::Interrupted`] if the shutdown flag is raised.
    pub fn group(&self, collections: &[&[FileRecord]]) -> Result<DuplicateIndex, GroupError> {
        let total: usize = collections.iter().map(|c| c.len()).sum();
        if let Some(cb) = &self.progress {
            cb.on_phase_start(PHASE_GROUPING, total);
        }

        let mut by_name: HashMap<String, Vec<DuplicateMember>> = HashMap::new();
        let mut last_report = Instant::now();

        let records = collections.iter().flat_map(|c| c.iter());
        for (idx, record) in records.enumerate() {
            if self.is_shutdown_requested() {
                return Err(GroupError::Interrupted);
            }

            by_name
                .entry(normalize_name(&record.file_name))
                .or_default()
                .push(DuplicateMember::from(record));

            let processed = idx + 1;
            if processed % PROGRESS_EVERY == 0 || last_report.elapsed() >= PROGRESS_PERIOD {
                if let Some(cb) = &self.progress {
                    cb.on_progress(processed, &format!("{processed}/{total} files"));
                }
                last_report = Instant::now();
            }
        }

        let groups: BTreeMap<String, DuplicateGroup> = by_name
            .into_iter()
            .filter(|(_, members)| members.len() > 1)
            .map(|(key, members)| (key.clone(), DuplicateGroup { key, members }))
            .collect();

        if let Some(cb) = &self.progress {
            cb.on_phase_end(PHASE_GROUPING);
        }
        log::debug!(
            "Grouped {} file(s) into {} duplicate group(s)",
            total,
            groups.len()
        );

        Ok(DuplicateIndex { groups })
    }
}

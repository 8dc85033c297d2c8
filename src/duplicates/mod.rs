//! Duplicate detection module.
//!
//! Duplicates are detected by file name only: two videos are copies of
//! each other when their names match ignoring case. File contents are
//! never read.

pub mod groups;

pub use groups::{
    group_by_name, normalize_name, DuplicateGroup, DuplicateIndex, DuplicateMember, GroupError,
    NameGrouper,
};

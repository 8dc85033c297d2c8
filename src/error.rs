//! Structured error handling and exit codes.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::duplicates::GroupError;
use crate::scanner::ScanError;

/// Exit codes for the mediadupe application.
///
/// - 0: Success (completed normally, something was reported)
/// - 1: General error (unexpected failure)
/// - 2: Nothing to report (no duplicates, or an empty library listing)
/// - 3: Partial success (completed with some non-fatal scan warnings)
/// - 4: Missing input (a base directory does not exist)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: reports were written.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// No duplicates: the run completed but there was nothing to report.
    NoDuplicates = 2,
    /// Partial success: reports were written but some items could not be read.
    PartialSuccess = 3,
    /// Missing input: a base directory was not found.
    MissingInput = 4,
    /// Interrupted: the run was interrupted by user (Ctrl+C).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "MD000",
            Self::GeneralError => "MD001",
            Self::NoDuplicates => "MD002",
            Self::PartialSuccess => "MD003",
            Self::MissingInput => "MD004",
            Self::Interrupted => "MD130",
        }
    }

    /// Map an application error to its exit code.
    ///
    /// Walks the whole error chain, so context added with `anyhow` does not
    /// hide an interruption or a missing directory underneath.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(app) = cause.downcast_ref::<AppError>() {
                return app.exit_code();
            }
            if let Some(scan) = cause.downcast_ref::<ScanError>() {
                match scan {
                    ScanError::Interrupted => return Self::Interrupted,
                    ScanError::NotFound(_) => return Self::MissingInput,
                    _ => {}
                }
            }
            if matches!(cause.downcast_ref::<GroupError>(), Some(GroupError::Interrupted)) {
                return Self::Interrupted;
            }
        }
        Self::GeneralError
    }
}

/// Failures raised by the application pipelines themselves.
#[derive(Debug, Error)]
pub enum AppError {
    /// A base directory given on the command line does not exist.
    #[error("{label} directory not found: {}", path.display())]
    MissingDirectory {
        /// Which library the directory belongs to
        label: &'static str,
        /// The directory that was checked
        path: PathBuf,
    },

    /// The user pressed Ctrl+C between pipeline steps.
    #[error("Operation interrupted by user")]
    Interrupted,
}

impl AppError {
    /// The exit code this error maps to.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::MissingDirectory { .. } => ExitCode::MissingInput,
            Self::Interrupted => ExitCode::Interrupted,
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "MD001")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message
    pub message: String,
    /// Underlying causes, outermost first
    pub causes: Vec<String>,
    /// Whether the operation was interrupted
    pub interrupted: bool,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: err.to_string(),
            causes: err.chain().skip(1).map(ToString::to_string).collect(),
            interrupted: exit_code == ExitCode::Interrupted,
        }
    }
}

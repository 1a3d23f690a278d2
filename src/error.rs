//! Error types for split tracking and record persistence.
//!
//! Every fallible operation in the crate returns [`LedgerError`]. None of the
//! variants are fatal: a front end reports them and keeps running.
//!
//! ## Error Categories
//!
//! - **Run Errors**: an append past the stage limit, a cumulative time that goes
//!   backwards, finalizing an empty run
//! - **Input Errors**: time strings that do not parse, bad context selectors
//! - **Persistence Errors**: record file read/write failures, malformed or
//!   too-new record files
//!
//! ## Recovery and Retry
//!
//! ```rust
//! use splitbook::LedgerError;
//! use std::path::PathBuf;
//!
//! let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
//! let error = LedgerError::persistence_error(PathBuf::from("records.json"), io_err);
//! if error.is_retryable() {
//!     for suggestion in error.recovery_suggestions() {
//!         println!("  - {}", suggestion);
//!     }
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ledger operations.
pub type Result<T, E = LedgerError> = std::result::Result<T, E>;

/// Main error type for ledger operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("Run already has all {stages} stages; finalize it before adding more")]
    RunComplete { stages: usize },

    #[error("Total time {total}s is less than the previous total {previous}s")]
    NegativeSplit { total: f64, previous: f64 },

    #[error("Current run is empty")]
    EmptyRun,

    #[error("Cannot read '{input}' as a time")]
    InvalidTime { input: String },

    #[error("Invalid context: {reason}")]
    InvalidContext { reason: String },

    #[error("Record file error: {path}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Record file schema version {found} is newer than supported version {supported}")]
    SchemaVersion { found: u32, supported: u32 },
}

impl LedgerError {
    /// Returns whether this error is potentially recoverable through retry.
    pub fn is_retryable(&self) -> bool {
        match self {
            LedgerError::Persistence { .. } => true,
            LedgerError::RunComplete { .. } => false,
            LedgerError::NegativeSplit { .. } => false,
            LedgerError::EmptyRun => false,
            LedgerError::InvalidTime { .. } => false,
            LedgerError::InvalidContext { .. } => false,
            LedgerError::Parse { .. } => false,
            LedgerError::SchemaVersion { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            LedgerError::RunComplete { .. } => vec![
                "End the current run to record it",
                "Reset the run to start over",
            ],
            LedgerError::NegativeSplit { .. } => vec![
                "Enter the cumulative time since the run started, not the stage time",
                "Check the previous entry for a typo",
            ],
            LedgerError::EmptyRun => vec!["Enter at least one stage time before ending the run"],
            LedgerError::InvalidTime { .. } => vec![
                "Use digits only: 45 is 0:45, 130 is 1:30, 1245 is 12:45",
                "Use a decimal point for raw seconds, e.g. 75.5",
            ],
            LedgerError::InvalidContext { .. } => vec![
                "Use a non-empty stage category name",
                "List known seasons before switching",
            ],
            LedgerError::Persistence { .. } => vec![
                "Check the record file directory exists and is writable",
                "Ensure sufficient disk space",
                "Retry the save; in-memory records are kept",
            ],
            LedgerError::Parse { .. } => vec![
                "Check the record file is valid JSON",
                "Restore the record file from a backup",
            ],
            LedgerError::SchemaVersion { .. } => vec![
                "Update splitbook to a version that understands this file",
                "Open the file with the version that wrote it",
            ],
        }
    }

    /// Helper constructor for record file errors with path context.
    pub fn persistence_error(path: PathBuf, source: std::io::Error) -> Self {
        LedgerError::Persistence { path, source }
    }

    /// Helper constructor for parse errors.
    pub fn parse_error(context: impl Into<String>, details: impl Into<String>) -> Self {
        LedgerError::Parse { context: context.into(), details: details.into() }
    }

    /// Helper constructor for time input errors.
    pub fn invalid_time(input: impl Into<String>) -> Self {
        LedgerError::InvalidTime { input: input.into() }
    }

    /// Helper constructor for context selection errors.
    pub fn invalid_context(reason: impl Into<String>) -> Self {
        LedgerError::InvalidContext { reason: reason.into() }
    }
}

impl From<std::io::Error> for LedgerError {
    fn from(err: std::io::Error) -> Self {
        LedgerError::Persistence { path: PathBuf::from("<unknown>"), source: err }
    }
}

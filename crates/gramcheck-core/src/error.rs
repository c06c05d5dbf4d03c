//! Data loading error types.
//!
//! Defined here so the session layer can distinguish "file is simply not
//! there" (degrade, keep going) from "file is there but broken" (report
//! with detail) without string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading quiz data files.
#[derive(Debug, Error)]
pub enum DataError {
    /// A required source file does not exist.
    #[error("file not found: {0}")]
    MissingFile(PathBuf),

    /// The file exists but is not valid JSON.
    #[error("invalid JSON in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A question record failed load-time validation.
    #[error("malformed question in set '{set_id}' at index {index}: {reason}")]
    MalformedQuestion {
        set_id: String,
        index: usize,
        reason: String,
    },

    /// An I/O failure other than the file being absent.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DataError {
    /// Returns `true` if this error means the source file is absent,
    /// which callers treat as "no data" rather than a failure.
    pub fn is_missing(&self) -> bool {
        matches!(self, DataError::MissingFile(_))
    }
}

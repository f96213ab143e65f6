//! Error types for report generation
//!
//! Structural input problems (missing record, unparsable JSON) and output
//! persistence failures are fatal to a single render and surface here.
//! Absent fields inside an otherwise valid record are never errors; the
//! data model resolves them to defaults.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for a single report render invocation
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("conversation '{id}' not found at {}", .path.display())]
    InputNotFound { id: String, path: PathBuf },

    #[error("malformed conversation record: {0}")]
    InputMalformed(#[source] serde_json::Error),

    #[error("failed to write report: {0}")]
    OutputWrite(#[source] io::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for report operations
pub type ReportResult<T> = Result<T, ReportError>;

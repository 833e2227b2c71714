//! Per-file run errors crossing the engine boundary.
//!
//! Every variant names the file path, and transform failures name the
//! rule, so a human can locate the one problematic file without a
//! stack trace.

use super::error_code::RecastErrorCode;
use super::{ScanError, TransformError};

/// Tagged result of processing one file.
///
/// Errors are local to one file and one visitor chain: one file's
/// failure never corrupts state for subsequent files, so the caller is
/// free to abort the run or skip and continue.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("failed to scan {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: ScanError,
    },

    #[error("rule '{rule}' failed on {path}: {source}")]
    Transform {
        path: String,
        rule: String,
        #[source]
        source: TransformError,
    },
}

impl RunError {
    /// The path of the file that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Parse { path, .. } | Self::Transform { path, .. } => path,
        }
    }
}

impl RecastErrorCode for RunError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse { source, .. } => source.error_code(),
            Self::Transform { source, .. } => source.error_code(),
        }
    }
}

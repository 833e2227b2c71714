//! Structural scan errors.
//!
//! Scanning never fails on malformed Java — it degrades to a partial
//! structural model. The only failures are I/O-shaped: undecodable
//! bytes or an unreadable file at the boundary.

use super::error_code::{self, RecastErrorCode};

/// Errors that can occur while turning raw file bytes into a `SourceFile`.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("{path} is not valid UTF-8")]
    InvalidEncoding { path: String },

    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

impl RecastErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}

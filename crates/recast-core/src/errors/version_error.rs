//! Target-version errors.

use super::error_code::{self, RecastErrorCode};

/// Raised when a requested target version is rejected.
///
/// The stock strategy selector never raises this: any integer outside
/// the curated set falls back to the generic version-token recipe.
/// The enum exists for deployments that want to reject out-of-range
/// versions instead of falling back.
#[derive(Debug, thiserror::Error)]
pub enum VersionError {
    #[error("unsupported target Java version {version}")]
    Unsupported { version: u32 },
}

impl RecastErrorCode for VersionError {
    fn error_code(&self) -> &'static str {
        error_code::VERSION_ERROR
    }
}

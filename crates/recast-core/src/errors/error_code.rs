//! Stable error codes for machine-readable reporting.

pub const SCAN_ERROR: &str = "RECAST_SCAN";
pub const TRANSFORM_ERROR: &str = "RECAST_TRANSFORM";
pub const VERSION_ERROR: &str = "RECAST_VERSION";
pub const CONFIG_ERROR: &str = "RECAST_CONFIG";
pub const CANCELLED: &str = "RECAST_CANCELLED";

/// Every recast error maps to a stable string code, independent of the
/// human-readable message.
pub trait RecastErrorCode {
    fn error_code(&self) -> &'static str;
}

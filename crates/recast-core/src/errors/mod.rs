//! Error handling for recast.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod run_error;
pub mod scan_error;
pub mod transform_error;
pub mod version_error;

pub use config_error::ConfigError;
pub use error_code::RecastErrorCode;
pub use run_error::RunError;
pub use scan_error::ScanError;
pub use transform_error::TransformError;
pub use version_error::VersionError;

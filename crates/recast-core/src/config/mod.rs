//! Configuration system for recast.
//! TOML-based, layered resolution: CLI > env > project file > defaults.

pub mod migration_config;

pub use migration_config::{Base64Config, CliOverrides, MigrationConfig};

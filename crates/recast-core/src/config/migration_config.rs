//! Migration run configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Settings for the Base64 replacement rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Base64Config {
    /// Package the legacy BASE64 codec lives in.
    pub legacy_package: String,
    /// Emit the MIME encoder/decoder instead of the standard one.
    pub use_mime_coder: bool,
}

impl Default for Base64Config {
    fn default() -> Self {
        Self {
            legacy_package: "sun.misc".to_string(),
            use_mime_coder: false,
        }
    }
}

/// Top-level run configuration.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RECAST_*`)
/// 3. Project config (`recast.toml` in the project root)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub target_version: u32,
    pub source_dir: String,
    pub dry_run: bool,
    pub base64: Base64Config,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            target_version: 17,
            source_dir: "src/main/java".to_string(),
            dry_run: false,
            base64: Base64Config::default(),
        }
    }
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub target_version: Option<u32>,
    pub source_dir: Option<String>,
    pub dry_run: Option<bool>,
}

impl MigrationConfig {
    /// Load configuration with layered resolution (see type docs).
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let project_config_path = root.join("recast.toml");
        if project_config_path.exists() {
            let text = std::fs::read_to_string(&project_config_path).map_err(|e| {
                ConfigError::Io {
                    path: project_config_path.display().to_string(),
                    message: e.to_string(),
                }
            })?;
            config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
                path: project_config_path.display().to_string(),
                message: e.to_string(),
            })?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    fn apply_env_overrides(config: &mut Self) {
        if let Some(v) = std::env::var("RECAST_TARGET_VERSION")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.target_version = v;
        }
        if let Ok(v) = std::env::var("RECAST_SOURCE_DIR") {
            config.source_dir = v;
        }
        if let Ok(v) = std::env::var("RECAST_DRY_RUN") {
            config.dry_run = matches!(v.as_str(), "1" | "true" | "yes");
        }
    }

    fn apply_cli_overrides(config: &mut Self, cli: &CliOverrides) {
        if let Some(v) = cli.target_version {
            config.target_version = v;
        }
        if let Some(ref v) = cli.source_dir {
            config.source_dir = v.clone();
        }
        if let Some(v) = cli.dry_run {
            config.dry_run = v;
        }
    }

    fn validate(config: &Self) -> Result<(), ConfigError> {
        if config.target_version == 0 {
            return Err(ConfigError::InvalidValue {
                field: "target_version".to_string(),
                message: "must be a positive Java version".to_string(),
            });
        }
        if config.source_dir.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source_dir".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

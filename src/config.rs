//! Configuration System
//!
//! Layered configuration for the API client, list defaults, credential storage
//! and logging. Sources merge in order: built-in defaults, the global config
//! file, the workspace `listkit.toml`, then `LISTKIT__*` environment variables.

use crate::error::ListkitError;
use crate::list::SortOrder;
use crate::logging::LoggingConfig;
use config::{Config, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

mod merge;
mod sources;

pub use merge::{ENV_PREFIX, ENV_SEPARATOR};
pub use sources::{global_config_path, WORKSPACE_FILE};

/// Upper bound on the search debounce.
const MAX_DEBOUNCE_MS: u64 = 10_000;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListkitConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub list: ListDefaults,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Defaults applied to every list controller built from config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListDefaults {
    #[serde(default = "default_limit")]
    pub limit: u32,

    #[serde(default = "default_sort_by")]
    pub sort_by: String,

    #[serde(default)]
    pub order: SortOrder,

    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

fn default_limit() -> u32 {
    20
}

fn default_sort_by() -> String {
    "name".to_string()
}

fn default_debounce_ms() -> u64 {
    300
}

impl Default for ListDefaults {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            sort_by: default_sort_by(),
            order: SortOrder::Asc,
            debounce_ms: default_debounce_ms(),
        }
    }
}

/// Credential storage settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Overrides the platform data directory location.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,
}

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigValidationError {
    #[error("api: {0}")]
    Api(String),

    #[error("list: {0}")]
    List(String),
}

impl ListkitConfig {
    /// Validate the entire configuration, collecting every problem.
    pub fn validate(&self) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        let base_url = self.api.base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            errors.push(ConfigValidationError::Api(format!(
                "base_url must start with http:// or https:// (got '{}')",
                self.api.base_url
            )));
        }
        if self.api.timeout_secs == 0 {
            errors.push(ConfigValidationError::Api(
                "timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.list.limit == 0 {
            errors.push(ConfigValidationError::List(
                "limit must be greater than 0".to_string(),
            ));
        }
        if self.list.sort_by.trim().is_empty() {
            errors.push(ConfigValidationError::List(
                "sort_by cannot be empty".to_string(),
            ));
        }
        if self.list.debounce_ms > MAX_DEBOUNCE_MS {
            errors.push(ConfigValidationError::List(format!(
                "debounce_ms must be at most {}",
                MAX_DEBOUNCE_MS
            )));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate and fold the errors into one [`ListkitError`].
    pub fn validated(self) -> Result<Self, ListkitError> {
        self.validate().map_err(|errors| {
            let msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ListkitError::ConfigError(format!(
                "Configuration validation failed:\n{}",
                msgs.join("\n")
            ))
        })?;
        Ok(self)
    }
}

/// Loads [`ListkitConfig`] from the layered sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load with `workspace_root` as the directory holding `listkit.toml`.
    pub fn load(workspace_root: &Path) -> Result<ListkitConfig, ListkitError> {
        let builder = merge::builder_with_defaults()?;
        let builder = sources::add_global(builder)?;
        let builder = sources::add_workspace(builder, workspace_root)?;
        let config = builder.add_source(merge::environment()).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load from one explicit file on top of the defaults. The file must exist.
    pub fn load_from_file(path: &Path) -> Result<ListkitConfig, ListkitError> {
        if !path.exists() {
            return Err(ListkitError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        let config: Config = merge::builder_with_defaults()?
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(merge::environment())
            .build()?;
        Ok(config.try_deserialize()?)
    }
}

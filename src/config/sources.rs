//! Config file sources.

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Workspace config file name.
pub const WORKSPACE_FILE: &str = "listkit.toml";

/// Path to the global config file:
/// `$XDG_CONFIG_HOME/listkit/config.toml`, else `~/.config/listkit/config.toml`.
pub fn global_config_path() -> Option<PathBuf> {
    let base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(xdg) if !xdg.is_empty() => PathBuf::from(xdg),
        _ => PathBuf::from(std::env::var("HOME").ok()?).join(".config"),
    };
    Some(base.join("listkit").join("config.toml"))
}

/// Add the global config file to the builder if it exists.
pub fn add_global(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let Some(path) = global_config_path() else {
        return Ok(builder);
    };
    if !path.exists() {
        warn!(
            config_path = %path.display(),
            "Global configuration file not found. Consider creating it for user-level defaults."
        );
        return Ok(builder);
    }
    let path = path.canonicalize().unwrap_or(path);
    debug!(config_path = %path.display(), "Using global config file");
    Ok(builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false)))
}

/// Add `<workspace_root>/listkit.toml` to the builder if it exists.
pub fn add_workspace(
    builder: ConfigBuilder<DefaultState>,
    workspace_root: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = workspace_root.join(WORKSPACE_FILE);
    if !path.exists() {
        return Ok(builder);
    }
    debug!(config_path = %path.display(), "Using workspace config file");
    Ok(builder.add_source(File::from(path.as_path()).format(FileFormat::Toml).required(false)))
}

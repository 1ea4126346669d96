//! Merge rules: defaults, override order, conflict handling.
//!
//! Later sources win key by key: defaults, then the global file, then the
//! workspace file, then `LISTKIT__*` environment variables.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment};

/// Environment variable prefix for config overrides.
pub const ENV_PREFIX: &str = "LISTKIT";

/// Nesting separator in environment keys, e.g. `LISTKIT__LIST__LIMIT`.
pub const ENV_SEPARATOR: &str = "__";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("api.base_url", "http://localhost:8080")?
        .set_default("api.timeout_secs", 30_i64)?
        .set_default("list.limit", 20_i64)?
        .set_default("list.sort_by", "name")?
        .set_default("list.order", "asc")?
        .set_default("list.debounce_ms", 300_i64)
}

/// Environment overrides, applied last.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator(ENV_SEPARATOR)
        .separator(ENV_SEPARATOR)
        .try_parsing(true)
}

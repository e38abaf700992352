//! Configuration file loading and the environment mode probe.

use std::path::Path;

use crate::error::ConfigError;
use crate::types::{CacheConfig, Mode};

/// Name of the configuration file looked up in a project directory.
pub const CONFIG_FILE_NAME: &str = "rekindle.toml";

/// Environment variable consulted by [`mode_from_env`].
pub const MODE_ENV_VAR: &str = "REKINDLE_ENV";

/// Loads and validates a `rekindle.toml` configuration from a directory.
pub fn load_config(project_dir: &Path) -> Result<CacheConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<CacheConfig, ConfigError> {
    let config: CacheConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates extension keys: each must name a non-empty extension.
fn validate_config(config: &CacheConfig) -> Result<(), ConfigError> {
    for ext in config.extensions.keys() {
        if ext.trim_start_matches('.').is_empty() {
            return Err(ConfigError::InvalidValue(format!(
                "extension key '{ext}' does not name an extension"
            )));
        }
    }
    Ok(())
}

/// Reads the deployment mode from the process environment.
///
/// This is the single place the environment is consulted; the cache core
/// itself takes the derived value as plain configuration. `REKINDLE_ENV`
/// set to `production` selects production mode, anything else (including
/// unset) selects development.
pub fn mode_from_env() -> Mode {
    mode_from_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
}

/// Maps a raw environment value onto a [`Mode`].
pub fn mode_from_value(value: Option<&str>) -> Mode {
    match value {
        Some("production") => Mode::Production,
        _ => Mode::Development,
    }
}

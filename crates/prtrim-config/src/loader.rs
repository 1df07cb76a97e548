//! Configuration loader.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::{ConfigError, ConfigResult, PluginConfig};

/// Configuration file names, in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["prtrim.toml", "prtrim.json"];

/// Loads configuration from the given path.
///
/// Files ending in `.json` are read as JSON, everything else as TOML.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_config(path: impl AsRef<Path>) -> ConfigResult<PluginConfig> {
    let path = path.as_ref();
    debug!(?path, "loading configuration");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let config = if is_json {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content)?
    };

    Ok(config)
}

/// Finds a configuration file in `start_dir` or its parents.
#[must_use]
pub fn find_config_file(start_dir: impl AsRef<Path>) -> Option<PathBuf> {
    start_dir.as_ref().ancestors().find_map(|dir| {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.exists())
    })
}

/// Finds and loads configuration from the current directory or parents.
///
/// # Errors
///
/// Returns an error if a configuration file exists but cannot be parsed.
pub fn find_and_load_config() -> ConfigResult<PluginConfig> {
    let current_dir = std::env::current_dir()?;
    find_and_load_config_from(&current_dir)
}

/// Finds and loads configuration starting from the given directory.
///
/// Walks up the directory tree; falls back to the default configuration when
/// no file is found.
///
/// # Errors
///
/// Returns an error if a configuration file exists but cannot be parsed.
pub fn find_and_load_config_from(start_dir: impl AsRef<Path>) -> ConfigResult<PluginConfig> {
    match find_config_file(start_dir.as_ref()) {
        Some(path) => load_config(path),
        None => {
            debug!(start = ?start_dir.as_ref(), "no configuration file, using defaults");
            Ok(PluginConfig::default())
        }
    }
}

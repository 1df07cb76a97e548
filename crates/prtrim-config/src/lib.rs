//! Configuration management for prtrim.
//!
//! This crate handles loading the plugin configuration from `prtrim.toml` or
//! `prtrim.json`.

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{
    CONFIG_FILE_NAMES, find_and_load_config, find_and_load_config_from, find_config_file,
    load_config,
};
pub use schema::{NotesGeneratorSetting, PluginConfig};

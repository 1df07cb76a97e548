//! Plugin error types.

use thiserror::Error;

/// Errors raised by downstream collaborators.
///
/// The pipeline adapter hands these back to its caller untouched.
#[derive(Debug, Error)]
pub enum PluginError {
    /// Plugin execution failed.
    #[error("plugin execution failed: {0}")]
    ExecutionFailed(String),

    /// Configuration error.
    #[error("plugin configuration error: {0}")]
    ConfigError(String),

    /// The configuration slice did not match the plugin's schema.
    #[error("plugin configuration error: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;

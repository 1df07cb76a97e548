//! Plugin system for prtrim.
//!
//! This crate provides the traits the pipeline adapter delegates to:
//! - [`Plugin`]: Base trait for all plugins
//! - [`CommitAnalyzer`]: Decides which kind of release the commits call for
//! - [`NotesGenerator`]: Renders release notes from the commits

mod context;
mod error;
mod traits;

pub use context::ReleaseContext;
pub use error::{PluginError, PluginResult};
pub use traits::Plugin;
pub use traits::analyzer::{CommitAnalyzer, ReleaseType};
pub use traits::notes::NotesGenerator;

/// Configuration slice forwarded verbatim to a collaborator.
pub type Options = serde_json::Map<String, serde_json::Value>;

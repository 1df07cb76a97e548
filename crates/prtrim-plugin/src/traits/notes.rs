//! Release notes generator trait.

use async_trait::async_trait;

use super::Plugin;
use crate::{Options, PluginResult, ReleaseContext};

/// Renders release notes from the context's commits.
#[async_trait]
pub trait NotesGenerator: Plugin {
    /// Generates the release notes text.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or rendering fails.
    async fn generate(&self, config: &Options, ctx: &ReleaseContext) -> PluginResult<String>;
}

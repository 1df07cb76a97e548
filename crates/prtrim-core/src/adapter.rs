//! Pipeline adapter between the release host and the collaborators.

use prtrim_config::PluginConfig;
use prtrim_plugin::{
    CommitAnalyzer, NotesGenerator, Options, PluginResult, ReleaseContext, ReleaseType,
};
use tracing::{debug, info};

use crate::normalize_commits;

/// Result of a commit analysis.
#[derive(Debug)]
pub struct Analysis {
    /// The context the analyzer saw, with normalized commits.
    pub context: ReleaseContext,

    /// The analyzer's verdict; `None` means no release is required.
    pub release: Option<ReleaseType>,
}

/// Result of a notes request.
#[derive(Debug)]
pub enum NotesOutcome {
    /// Notes generation is disabled; nothing was normalized or delegated.
    Skipped,

    /// The notes generator ran.
    Generated {
        /// The context the generator saw, with normalized commits.
        context: ReleaseContext,
        /// The generated notes.
        notes: String,
    },
}

impl NotesOutcome {
    /// Returns the notes text, if any was generated.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        match self {
            Self::Skipped => None,
            Self::Generated { notes, .. } => Some(notes),
        }
    }
}

/// Normalizes commits and delegates to the configured collaborators.
///
/// Collaborator errors are returned exactly as the collaborator produced them.
pub struct Adapter {
    analyzer: Box<dyn CommitAnalyzer>,
    notes: Box<dyn NotesGenerator>,
}

impl Adapter {
    /// Creates an adapter over the given collaborators.
    #[must_use]
    pub fn new(analyzer: Box<dyn CommitAnalyzer>, notes: Box<dyn NotesGenerator>) -> Self {
        Self { analyzer, notes }
    }

    /// Returns a reference to the commit analyzer.
    pub fn analyzer(&self) -> &dyn CommitAnalyzer {
        self.analyzer.as_ref()
    }

    /// Returns a reference to the notes generator.
    pub fn notes_generator(&self) -> &dyn NotesGenerator {
        self.notes.as_ref()
    }

    /// Analyzes a normalized copy of `context`.
    ///
    /// Only `commitAnalyzerConfig` is forwarded to the analyzer.
    ///
    /// # Errors
    ///
    /// Returns the analyzer's error unchanged.
    pub async fn analyze_commits(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> PluginResult<Analysis> {
        let context = context.with_commits(normalize_commits(&context.commits));
        let release = self.delegate_analysis(config, &context).await?;
        Ok(Analysis { context, release })
    }

    /// Generates notes from a normalized copy of `context`.
    ///
    /// Returns [`NotesOutcome::Skipped`] without touching the commits when
    /// `notesGeneratorConfig` is `false`.
    ///
    /// # Errors
    ///
    /// Returns the notes generator's error unchanged.
    pub async fn generate_notes(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> PluginResult<NotesOutcome> {
        let Some(options) = config.notes_generator_config.options() else {
            info!("notes generation disabled, skipping");
            return Ok(NotesOutcome::Skipped);
        };

        let context = context.with_commits(normalize_commits(&context.commits));
        let notes = self.delegate_notes(options, &context).await?;
        Ok(NotesOutcome::Generated { context, notes })
    }

    /// Like [`Adapter::analyze_commits`], but replaces the caller's commits
    /// with the normalized ones before delegating.
    ///
    /// # Errors
    ///
    /// Returns the analyzer's error unchanged.
    pub async fn analyze_commits_in_place(
        &self,
        config: &PluginConfig,
        context: &mut ReleaseContext,
    ) -> PluginResult<Option<ReleaseType>> {
        context.commits = normalize_commits(&context.commits);
        self.delegate_analysis(config, context).await
    }

    /// Like [`Adapter::generate_notes`], but replaces the caller's commits
    /// with the normalized ones before delegating.
    ///
    /// Returns `None` when notes generation is disabled; the context is then
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Returns the notes generator's error unchanged.
    pub async fn generate_notes_in_place(
        &self,
        config: &PluginConfig,
        context: &mut ReleaseContext,
    ) -> PluginResult<Option<String>> {
        let Some(options) = config.notes_generator_config.options() else {
            info!("notes generation disabled, skipping");
            return Ok(None);
        };

        context.commits = normalize_commits(&context.commits);
        self.delegate_notes(options, context).await.map(Some)
    }

    async fn delegate_analysis(
        &self,
        config: &PluginConfig,
        context: &ReleaseContext,
    ) -> PluginResult<Option<ReleaseType>> {
        debug!(
            analyzer = self.analyzer.name(),
            commits = context.commits.len(),
            "delegating commit analysis"
        );
        self.analyzer
            .analyze(&config.commit_analyzer_config, context)
            .await
    }

    async fn delegate_notes(
        &self,
        options: &Options,
        context: &ReleaseContext,
    ) -> PluginResult<String> {
        debug!(
            generator = self.notes.name(),
            commits = context.commits.len(),
            "delegating notes generation"
        );
        self.notes.generate(options, context).await
    }
}

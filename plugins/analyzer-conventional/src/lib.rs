//! Conventional Commits analyzer plugin.

use async_trait::async_trait;
use prtrim_commit::ConventionalCommit;
use prtrim_plugin::{
    CommitAnalyzer, Options, Plugin, PluginError, PluginResult, ReleaseContext, ReleaseType,
};
use serde::Deserialize;
use tracing::debug;

/// Presets whose commit format this analyzer understands.
const SUPPORTED_PRESETS: [&str; 2] = ["angular", "conventionalcommits"];

/// Options read from `commitAnalyzerConfig`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerOptions {
    /// Commit message convention.
    #[serde(default)]
    pub preset: Option<String>,

    /// Custom rules, checked before the defaults.
    #[serde(default)]
    pub release_rules: Vec<ReleaseRule>,
}

impl AnalyzerOptions {
    /// Reads and validates options from a forwarded configuration slice.
    ///
    /// # Errors
    ///
    /// Returns an error if the options don't match the schema or name an
    /// unsupported preset.
    pub fn from_options(options: &Options) -> PluginResult<Self> {
        let parsed: Self = serde_json::from_value(serde_json::Value::Object(options.clone()))?;

        if let Some(preset) = &parsed.preset
            && !SUPPORTED_PRESETS.contains(&preset.as_str())
        {
            return Err(PluginError::ConfigError(format!(
                "unsupported preset: {preset}"
            )));
        }

        if parsed
            .release_rules
            .iter()
            .any(|rule| matches!(rule.release, RuleRelease::Flag(true)))
        {
            return Err(PluginError::ConfigError(
                "release rule must be major, minor, patch or false".to_string(),
            ));
        }

        Ok(parsed)
    }
}

/// A custom release rule. Every field that is set must match the commit.
#[derive(Debug, Clone, Deserialize)]
pub struct ReleaseRule {
    /// Commit type to match.
    #[serde(default)]
    pub r#type: Option<String>,

    /// Scope to match.
    #[serde(default)]
    pub scope: Option<String>,

    /// Breaking flag to match.
    #[serde(default)]
    pub breaking: Option<bool>,

    /// Release triggered by a matching commit.
    pub release: RuleRelease,
}

impl ReleaseRule {
    fn matches(&self, commit: &ConventionalCommit) -> bool {
        self.r#type.as_ref().is_none_or(|t| *t == commit.r#type)
            && self
                .scope
                .as_ref()
                .is_none_or(|s| commit.scope.as_ref() == Some(s))
            && self.breaking.is_none_or(|b| b == commit.breaking)
    }
}

/// Release named by a rule: a release type, or `false` for none.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RuleRelease {
    /// A release type.
    Release(ReleaseType),
    /// `false` suppresses the release.
    Flag(bool),
}

impl RuleRelease {
    fn release(self) -> Option<ReleaseType> {
        match self {
            Self::Release(release) => Some(release),
            Self::Flag(_) => None,
        }
    }
}

/// Types that trigger a minor release unless a rule says otherwise.
const MINOR_TYPES: [&str; 1] = ["feat"];

/// Types that trigger a patch release unless a rule says otherwise.
const PATCH_TYPES: [&str; 2] = ["fix", "perf"];

/// Conventional Commits analyzer.
///
/// Default rules:
/// - Breaking changes → Major
/// - `feat` → Minor
/// - `fix`, `perf` → Patch
/// - Other → no release
pub struct ConventionalAnalyzer;

impl ConventionalAnalyzer {
    /// Creates a new analyzer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn default_release(commit: &ConventionalCommit) -> Option<ReleaseType> {
        let commit_type = commit.r#type.as_str();
        if commit.breaking {
            Some(ReleaseType::Major)
        } else if MINOR_TYPES.contains(&commit_type) {
            Some(ReleaseType::Minor)
        } else if PATCH_TYPES.contains(&commit_type) {
            Some(ReleaseType::Patch)
        } else {
            None
        }
    }

    /// Returns the release a single commit calls for.
    fn commit_release(commit: &ConventionalCommit, rules: &[ReleaseRule]) -> Option<ReleaseType> {
        match rules.iter().find(|rule| rule.matches(commit)) {
            Some(rule) => rule.release.release(),
            None => Self::default_release(commit),
        }
    }
}

impl Default for ConventionalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for ConventionalAnalyzer {
    fn name(&self) -> &'static str {
        "conventional"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Determines the release type from Conventional Commits"
    }
}

#[async_trait]
impl CommitAnalyzer for ConventionalAnalyzer {
    async fn analyze(
        &self,
        config: &Options,
        ctx: &ReleaseContext,
    ) -> PluginResult<Option<ReleaseType>> {
        let options = AnalyzerOptions::from_options(config)?;
        let mut release: Option<ReleaseType> = None;

        for record in &ctx.commits {
            let Some(commit) = ConventionalCommit::parse(record) else {
                debug!(
                    hash = record.short_hash().unwrap_or("-"),
                    headline = %record.headline(),
                    "skipping unparseable commit"
                );
                continue;
            };

            let Some(commit_release) = Self::commit_release(&commit, &options.release_rules)
            else {
                continue;
            };

            debug!(
                commit_type = %commit.r#type,
                release = %commit_release,
                "commit calls for a release"
            );
            let combined = release.map_or(commit_release, |current| current.max(commit_release));
            if combined == ReleaseType::Major {
                return Ok(Some(combined));
            }
            release = Some(combined);
        }

        Ok(release)
    }
}

//! Markdown release notes generator plugin.

use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;

use async_trait::async_trait;
use chrono::Utc;
use prtrim_commit::ConventionalCommit;
use prtrim_plugin::{NotesGenerator, Options, Plugin, PluginResult, ReleaseContext};
use serde::Deserialize;
use tracing::debug;

/// Section key for breaking changes, whatever their commit type.
const BREAKING: &str = "breaking";

/// Order for displaying sections. Types not listed follow alphabetically.
const SECTION_ORDER: [&str; 13] = [
    BREAKING, "feat", "fix", "perf", "revert", "docs", "refactor", "style", "test", "build", "ci",
    "deps", "chore",
];

/// Options read from `notesGeneratorConfig`. Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesOptions {
    /// Append the short commit hash to each entry.
    #[serde(default)]
    pub include_hashes: bool,

    /// Section titles overriding the defaults, keyed by commit type.
    #[serde(default)]
    pub type_labels: HashMap<String, String>,
}

impl NotesOptions {
    /// Reads options from a forwarded configuration slice.
    ///
    /// # Errors
    ///
    /// Returns an error if a known key has the wrong type.
    pub fn from_options(options: &Options) -> PluginResult<Self> {
        Ok(serde_json::from_value(serde_json::Value::Object(
            options.clone(),
        ))?)
    }

    fn label(&self, section: &str) -> String {
        self.type_labels
            .get(section)
            .cloned()
            .unwrap_or_else(|| MarkdownNotes::default_label(section))
    }
}

/// Markdown notes generator.
///
/// Renders one `###` section per commit type under a `##` release header.
pub struct MarkdownNotes;

impl MarkdownNotes {
    /// Creates a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Returns the default title for a section.
    fn default_label(section: &str) -> String {
        match section {
            BREAKING => "Breaking Changes".to_string(),
            "feat" => "Features".to_string(),
            "fix" => "Bug Fixes".to_string(),
            "perf" => "Performance Improvements".to_string(),
            "revert" => "Reverts".to_string(),
            "docs" => "Documentation".to_string(),
            "refactor" => "Code Refactoring".to_string(),
            "style" => "Styles".to_string(),
            "test" => "Tests".to_string(),
            "build" => "Build System".to_string(),
            "ci" => "Continuous Integration".to_string(),
            "deps" => "Dependencies".to_string(),
            "chore" => "Miscellaneous Chores".to_string(),
            _ => section.to_string(),
        }
    }

    /// Groups commits into sections, keeping their order within each section.
    fn group(ctx: &ReleaseContext) -> BTreeMap<String, Vec<ConventionalCommit>> {
        let mut groups: BTreeMap<String, Vec<ConventionalCommit>> = BTreeMap::new();

        for record in &ctx.commits {
            let Some(commit) = ConventionalCommit::parse(record) else {
                debug!(headline = %record.headline(), "skipping unparseable commit");
                continue;
            };

            let section = if commit.breaking {
                BREAKING.to_string()
            } else {
                commit.r#type.clone()
            };
            groups.entry(section).or_default().push(commit);
        }

        groups
    }

    fn header(ctx: &ReleaseContext) -> String {
        match &ctx.next_release {
            Some(version) => format!("## {version} ({})", Utc::now().format("%Y-%m-%d")),
            None => "## Unreleased".to_string(),
        }
    }

    fn write_section(
        output: &mut String,
        label: &str,
        commits: &[ConventionalCommit],
        options: &NotesOptions,
    ) {
        _ = writeln!(output, "\n### {label}\n");

        for commit in commits {
            let scope = commit
                .scope
                .as_ref()
                .map(|s| format!("**{s}:** "))
                .unwrap_or_default();

            let hash = match (commit.short_hash(), options.include_hashes) {
                (Some(hash), true) => format!(" ({hash})"),
                _ => String::new(),
            };

            _ = writeln!(output, "- {scope}{}{hash}", commit.description);
        }
    }
}

impl Default for MarkdownNotes {
    fn default() -> Self {
        Self::new()
    }
}

impl Plugin for MarkdownNotes {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn description(&self) -> &'static str {
        "Renders release notes as Markdown grouped by commit type"
    }
}

#[async_trait]
impl NotesGenerator for MarkdownNotes {
    async fn generate(&self, config: &Options, ctx: &ReleaseContext) -> PluginResult<String> {
        let options = NotesOptions::from_options(config)?;
        let mut groups = Self::group(ctx);

        let mut output = Self::header(ctx);
        output.push('\n');

        for section in SECTION_ORDER {
            if let Some(commits) = groups.remove(section) {
                Self::write_section(&mut output, &options.label(section), &commits, &options);
            }
        }

        // Remaining types, alphabetically
        for (section, commits) in &groups {
            Self::write_section(&mut output, &options.label(section), commits, &options);
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prtrim_commit::CommitRecord;
    use semver::Version;
    use serde_json::json;

    fn context(messages: &[&str]) -> ReleaseContext {
        ReleaseContext::new(
            "/tmp",
            messages
                .iter()
                .map(|m| CommitRecord::new(*m).with_hash("abc1234567890"))
                .collect(),
        )
    }

    fn options(value: serde_json::Value) -> Options {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    async fn render(config: &Options, ctx: &ReleaseContext) -> String {
        MarkdownNotes::new().generate(config, ctx).await.unwrap()
    }

    #[tokio::test]
    async fn test_header_with_next_release() {
        let ctx = context(&["feat: a"]).next_release(Version::new(1, 2, 0));
        let output = render(&Options::new(), &ctx).await;
        assert!(output.starts_with("## 1.2.0 ("));
    }

    #[tokio::test]
    async fn test_header_unreleased() {
        let output = render(&Options::new(), &context(&["feat: a"])).await;
        assert!(output.starts_with("## Unreleased\n"));
    }

    #[tokio::test]
    async fn test_basic_sections() {
        let output = render(
            &Options::new(),
            &context(&["feat: add new feature", "fix: resolve bug"]),
        )
        .await;

        assert!(output.contains("### Features\n\n- add new feature\n"));
        assert!(output.contains("### Bug Fixes\n\n- resolve bug\n"));
    }

    #[tokio::test]
    async fn test_section_order() {
        let output = render(
            &Options::new(),
            &context(&["docs: d", "fix: b", "feat!: a", "feat: c", "zzz: e"]),
        )
        .await;

        let position = |needle: &str| output.find(needle).unwrap();
        assert!(position("### Breaking Changes") < position("### Features"));
        assert!(position("### Features") < position("### Bug Fixes"));
        assert!(position("### Bug Fixes") < position("### Documentation"));
        assert!(position("### Documentation") < position("### zzz"));
    }

    #[tokio::test]
    async fn test_breaking_only_in_breaking_section() {
        let output = render(&Options::new(), &context(&["feat(api)!: drop v1"])).await;
        assert!(output.contains("### Breaking Changes\n\n- **api:** drop v1\n"));
        assert!(!output.contains("### Features"));
    }

    #[tokio::test]
    async fn test_keeps_commit_order_within_section() {
        let output = render(&Options::new(), &context(&["fix: first", "fix: second"])).await;
        assert!(output.contains("- first\n- second\n"));
    }

    #[tokio::test]
    async fn test_unparseable_commits_skipped() {
        let output = render(
            &Options::new(),
            &context(&["Merged PR 12: feat: still prefixed", "Update README"]),
        )
        .await;
        assert_eq!(output, "## Unreleased\n");
    }

    #[tokio::test]
    async fn test_include_hashes() {
        let config = options(json!({"includeHashes": true}));
        let output = render(&config, &context(&["feat: add feature"])).await;
        assert!(output.contains("- add feature (abc1234)\n"));
    }

    #[tokio::test]
    async fn test_include_hashes_multibyte() {
        let config = options(json!({"includeHashes": true}));
        let ctx = ReleaseContext::new(
            "/tmp",
            vec![CommitRecord::new("fix: odd hash").with_hash("123456ü89")],
        );
        let output = render(&config, &ctx).await;
        assert!(output.contains("- odd hash (123456ü)\n"));
    }

    #[tokio::test]
    async fn test_hashes_omitted_by_default() {
        let output = render(&Options::new(), &context(&["feat: add feature"])).await;
        assert!(!output.contains("abc1234"));
    }

    #[tokio::test]
    async fn test_custom_type_labels() {
        let config = options(json!({"typeLabels": {"feat": "New Features"}}));
        let output = render(&config, &context(&["feat: add feature"])).await;
        assert!(output.contains("### New Features"));
        assert!(!output.contains("### Features"));
    }

    #[tokio::test]
    async fn test_unknown_keys_ignored() {
        let config = options(json!({"preset": "angular", "writerOpts": {}}));
        let output = render(&config, &context(&["fix: a"])).await;
        assert!(output.contains("### Bug Fixes"));
    }

    #[tokio::test]
    async fn test_wrong_option_type_is_error() {
        let config = options(json!({"includeHashes": "yes"}));
        assert!(
            MarkdownNotes::new()
                .generate(&config, &context(&["fix: a"]))
                .await
                .is_err()
        );
    }

    #[test]
    fn test_default_labels() {
        assert_eq!(MarkdownNotes::default_label("feat"), "Features");
        assert_eq!(MarkdownNotes::default_label("fix"), "Bug Fixes");
        assert_eq!(MarkdownNotes::default_label(BREAKING), "Breaking Changes");
        assert_eq!(MarkdownNotes::default_label("custom"), "custom");
    }

    #[test]
    fn test_plugin_metadata() {
        let notes = MarkdownNotes;
        assert_eq!(notes.name(), "markdown");
        assert_eq!(notes.version(), env!("CARGO_PKG_VERSION"));
        assert!(!notes.description().is_empty());
    }
}

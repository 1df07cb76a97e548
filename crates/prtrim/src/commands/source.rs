//! Shared commit input, configuration and runtime helpers.

use std::future::Future;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use semver::Version;
use tracing::{debug, info};

use prtrim_analyzer_conventional::ConventionalAnalyzer;
use prtrim_commit::CommitRecord;
use prtrim_config::{PluginConfig, find_and_load_config, load_config};
use prtrim_core::Adapter;
use prtrim_git::Repository;
use prtrim_notes_markdown::MarkdownNotes;
use prtrim_plugin::ReleaseContext;

/// Where commit records come from.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// JSON file with an array of commit records ("-" for stdin).
    /// Reads the git repository in the current directory when omitted.
    #[arg(short, long)]
    pub input: Option<PathBuf>,
}

/// Arguments shared by the commands that run a collaborator.
#[derive(Debug, Args)]
pub struct ReleaseArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Configuration file (defaults to prtrim.toml or prtrim.json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prefix of version tags
    #[arg(long, default_value = "v")]
    pub tag_prefix: String,

    /// Version of the previous release, overriding the latest version tag
    #[arg(long)]
    pub last_release: Option<Version>,
}

/// Reads records from a JSON file or stdin. `null` entries are kept.
pub fn read_records(path: &Path) -> Result<Vec<Option<CommitRecord>>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read commits from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    serde_json::from_str(&content).context("commit input must be a JSON array of commit records")
}

/// Reads commits from git, since the latest version tag.
pub fn git_context(tag_prefix: &str) -> Result<ReleaseContext> {
    let repo = Repository::discover().context("not in a git repository")?;
    let latest = repo.latest_version_tag(tag_prefix)?;
    let commits = repo.commits_since(latest.as_ref().map(|(tag, _)| tag.as_str()))?;

    let mut ctx = ReleaseContext::new(repo.path(), commits);
    if let Some((tag, version)) = latest {
        info!(%tag, "using commits since latest version tag");
        ctx = ctx.last_release(version);
    }
    Ok(ctx)
}

/// Builds the release context the collaborators run against.
pub fn load_context(args: &ReleaseArgs) -> Result<ReleaseContext> {
    let mut ctx = match &args.source.input {
        Some(path) => {
            // Absent records carry nothing to analyze
            let commits = read_records(path)?.into_iter().flatten().collect();
            let cwd = std::env::current_dir().context("failed to read current directory")?;
            ReleaseContext::new(cwd, commits)
        }
        None => git_context(&args.tag_prefix)?,
    };

    if let Some(version) = &args.last_release {
        ctx.last_release = Some(version.clone());
    }

    debug!(
        commits = ctx.commits.len(),
        last_release = ?ctx.last_release,
        "built release context"
    );
    Ok(ctx)
}

/// Loads the configuration named on the command line, or searches for one.
pub fn load_plugin_config(path: Option<&Path>) -> Result<PluginConfig> {
    let config = match path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => find_and_load_config().context("failed to load configuration")?,
    };
    Ok(config)
}

/// Creates the adapter over the built-in collaborators.
pub fn adapter() -> Adapter {
    Adapter::new(
        Box::new(ConventionalAnalyzer::new()),
        Box::new(MarkdownNotes::new()),
    )
}

/// Runs a future to completion on a fresh runtime.
pub fn block_on<F: Future>(future: F) -> Result<F::Output> {
    let rt = tokio::runtime::Runtime::new().context("failed to create async runtime")?;
    Ok(rt.block_on(future))
}

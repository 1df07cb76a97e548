//! Normalize command.

use anyhow::{Context, Result};
use clap::Args;

use prtrim_core::normalize;

use super::source::{InputArgs, git_context, read_records};

/// Arguments for the normalize command.
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Prefix of version tags
    #[arg(long, default_value = "v")]
    pub tag_prefix: String,
}

/// Runs the normalize command.
///
/// Prints the records as a JSON array; `null` entries stay `null`.
pub fn run(args: &NormalizeArgs) -> Result<()> {
    let records = match &args.source.input {
        Some(path) => read_records(path)?,
        None => git_context(&args.tag_prefix)?
            .commits
            .into_iter()
            .map(Some)
            .collect(),
    };

    let normalized: Vec<_> = records.iter().map(|r| normalize(r.as_ref())).collect();
    let json = serde_json::to_string_pretty(&normalized).context("failed to encode commits")?;
    println!("{json}");

    Ok(())
}

//! Analyze command.

use anyhow::Result;
use clap::Args;
use tracing::info;

use super::source::{ReleaseArgs, adapter, block_on, load_context, load_plugin_config};

/// Arguments for the analyze command.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

/// Runs the analyze command.
///
/// Prints the release type, or `none`, and the next version when the previous
/// one is known.
pub fn run(args: &AnalyzeArgs) -> Result<()> {
    let config = load_plugin_config(args.release.config.as_deref())?;
    let ctx = load_context(&args.release)?;

    let adapter = adapter();
    let analysis = block_on(adapter.analyze_commits(&config, &ctx))??;

    let Some(release) = analysis.release else {
        info!("no release required");
        println!("none");
        return Ok(());
    };

    println!("{release}");
    if let Some(current) = &analysis.context.last_release {
        let next = release.bump(current);
        info!(%current, %next, "calculated next version");
        println!("{next}");
    }

    Ok(())
}

//! Notes command.

use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use prtrim_core::NotesOutcome;

use super::source::{ReleaseArgs, adapter, block_on, load_context, load_plugin_config};

/// Arguments for the notes command.
#[derive(Debug, Args)]
pub struct NotesArgs {
    #[command(flatten)]
    pub release: ReleaseArgs,
}

/// Runs the notes command.
///
/// Prints nothing when notes are disabled. Otherwise the commits are analyzed
/// first so the notes can name the next version; a failed analysis only costs
/// the version in the header.
pub fn run(args: &NotesArgs) -> Result<()> {
    let config = load_plugin_config(args.release.config.as_deref())?;
    if config.notes_generator_config.is_disabled() {
        info!("notes generation disabled");
        return Ok(());
    }

    let mut ctx = load_context(&args.release)?;

    let adapter = adapter();
    let outcome = block_on(async {
        match adapter.analyze_commits(&config, &ctx).await {
            Ok(analysis) => {
                if let (Some(release), Some(current)) = (analysis.release, &ctx.last_release) {
                    ctx.next_release = Some(release.bump(current));
                }
            }
            Err(e) => warn!("commit analysis failed, next version unknown: {e}"),
        }
        adapter.generate_notes(&config, &ctx).await
    })??;

    match outcome {
        NotesOutcome::Skipped => info!("notes generation disabled"),
        NotesOutcome::Generated { notes, .. } => print!("{notes}"),
    }

    Ok(())
}

//! CLI definition.

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Strip Azure DevOps merge prefixes from commits before release analysis.
#[derive(Debug, Parser)]
#[command(name = "prtrim")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print commit records with merge prefixes removed
    Normalize(commands::normalize::NormalizeArgs),

    /// Determine the release type from commits
    Analyze(commands::analyze::AnalyzeArgs),

    /// Generate release notes from commits
    Notes(commands::notes::NotesArgs),
}

impl Cli {
    /// Runs the CLI command.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Normalize(args) => commands::normalize::run(&args),
            Commands::Analyze(args) => commands::analyze::run(&args),
            Commands::Notes(args) => commands::notes::run(&args),
        }
    }
}

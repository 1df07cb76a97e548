//! Subcommands.

pub mod analyze;
pub mod normalize;
pub mod notes;

mod source;

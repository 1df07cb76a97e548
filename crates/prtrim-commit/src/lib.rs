//! Commit types for prtrim.
//!
//! This crate provides the commit types used throughout prtrim:
//! - [`CommitRecord`]: A commit as handed over by the release host or read from Git
//! - [`ConventionalCommit`]: A Conventional Commits view of a record, used by the
//!   bundled analyzer and notes plugins

mod conventional;
mod record;

pub use conventional::ConventionalCommit;
pub use record::CommitRecord;

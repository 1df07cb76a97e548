//! Core library for prtrim.
//!
//! Pull-request merges in some hosted Git services prefix the original commit
//! subject with `Merged PR <id>:`. This crate strips that prefix from commit
//! records and forwards the cleaned records, together with the relevant
//! configuration slice, to a commit analyzer or a notes generator.

mod adapter;
mod normalizer;

pub use adapter::{Adapter, Analysis, NotesOutcome};
pub use normalizer::{normalize, normalize_commits, normalize_record, strip_merge_prefix};

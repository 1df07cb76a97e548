//! Git commit source for prtrim.
//!
//! Reads the commits of the upcoming release as [`prtrim_commit::CommitRecord`]s
//! and locates the latest version tag.

mod error;
mod repository;

pub use error::{GitError, GitResult};
pub use repository::Repository;

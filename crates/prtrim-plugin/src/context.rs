//! Release context handed to the collaborators.

use std::path::PathBuf;

use prtrim_commit::CommitRecord;
use semver::Version;

/// The commit collection plus the release versions for one evaluation.
#[derive(Debug, Clone, Default)]
pub struct ReleaseContext {
    /// Path to the repository root.
    pub repo_path: PathBuf,

    /// Commits since the last release, newest first.
    pub commits: Vec<CommitRecord>,

    /// The version of the last release, if any.
    pub last_release: Option<Version>,

    /// The version about to be released, once known.
    pub next_release: Option<Version>,
}

impl ReleaseContext {
    /// Creates a new release context.
    #[must_use]
    pub fn new(repo_path: impl Into<PathBuf>, commits: Vec<CommitRecord>) -> Self {
        Self {
            repo_path: repo_path.into(),
            commits,
            ..Self::default()
        }
    }

    /// Returns a copy of this context carrying `commits` instead.
    #[must_use]
    pub fn with_commits(&self, commits: Vec<CommitRecord>) -> Self {
        Self {
            repo_path: self.repo_path.clone(),
            commits,
            last_release: self.last_release.clone(),
            next_release: self.next_release.clone(),
        }
    }

    /// Sets the last release version.
    #[must_use]
    pub fn last_release(mut self, version: Version) -> Self {
        self.last_release = Some(version);
        self
    }

    /// Sets the next release version.
    #[must_use]
    pub fn next_release(mut self, version: Version) -> Self {
        self.next_release = Some(version);
        self
    }
}

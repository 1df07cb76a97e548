//! Commit analyzer trait.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::Plugin;
use crate::{Options, PluginResult, ReleaseContext};

/// Release type, from least to most impactful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    /// Patch release (bug fixes).
    Patch,
    /// Minor release (new features).
    Minor,
    /// Major release (breaking changes).
    Major,
}

impl ReleaseType {
    /// Returns true if this release type is greater than another.
    #[must_use]
    pub fn is_greater_than(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Major, Self::Minor | Self::Patch) | (Self::Minor, Self::Patch)
        )
    }

    /// Returns the maximum of two release types.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self.is_greater_than(other) {
            self
        } else {
            other
        }
    }

    /// Applies this release type to a version.
    #[must_use]
    pub fn bump(self, current: &semver::Version) -> semver::Version {
        match self {
            Self::Major => semver::Version::new(current.major + 1, 0, 0),
            Self::Minor => semver::Version::new(current.major, current.minor + 1, 0),
            Self::Patch => semver::Version::new(current.major, current.minor, current.patch + 1),
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Minor => write!(f, "minor"),
            Self::Patch => write!(f, "patch"),
        }
    }
}

/// Decides which kind of release the commits call for.
#[async_trait]
pub trait CommitAnalyzer: Plugin {
    /// Analyzes the context's commits.
    ///
    /// Returns `None` when no release is required.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or analysis fails.
    async fn analyze(
        &self,
        config: &Options,
        ctx: &ReleaseContext,
    ) -> PluginResult<Option<ReleaseType>>;
}

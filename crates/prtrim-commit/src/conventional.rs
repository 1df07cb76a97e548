//! Conventional Commits view of a commit record.

use std::sync::LazyLock;

use regex::Regex;

use crate::CommitRecord;
use crate::record::abbreviate;

static CONVENTIONAL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<type>\w+)(?:\((?P<scope>[^)]+)\))?(?P<breaking>!)?: (?P<description>.+)$")
        .expect("invalid regex")
});

static BREAKING_FOOTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^BREAKING[ -]CHANGE: ").expect("invalid regex"));

/// A commit whose headline follows `type(scope)!: description`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    /// The commit type (feat, fix, docs, etc.).
    pub r#type: String,

    /// The optional scope.
    pub scope: Option<String>,

    /// The headline text after the type and scope prefix.
    pub description: String,

    /// Whether this is a breaking change.
    pub breaking: bool,

    /// The commit hash, when known.
    pub hash: Option<String>,
}

impl ConventionalCommit {
    /// Parses the headline of a record.
    ///
    /// Returns `None` if the headline doesn't follow the convention.
    #[must_use]
    pub fn parse(record: &CommitRecord) -> Option<Self> {
        let captures = CONVENTIONAL_RE.captures(record.headline())?;

        let footer_breaking = [record.message.as_deref(), record.body.as_deref()]
            .into_iter()
            .flatten()
            .any(|text| BREAKING_FOOTER_RE.is_match(text));

        Some(Self {
            r#type: captures.name("type")?.as_str().to_string(),
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            description: captures.name("description")?.as_str().to_string(),
            breaking: captures.name("breaking").is_some() || footer_breaking,
            hash: record.hash.clone(),
        })
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> Option<&str> {
        self.hash.as_deref().map(abbreviate)
    }
}

//! Commit record as seen by the release pipeline.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Cuts a hash down to its first 7 characters.
pub(crate) fn abbreviate(hash: &str) -> &str {
    hash.char_indices()
        .nth(7)
        .map_or(hash, |(end, _)| &hash[..end])
}

/// One version-control commit.
///
/// Only `message` and `subject` are ever rewritten by prtrim. Every other field,
/// including the ones collected in [`CommitRecord::extra`], passes through as is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    /// The commit hash (SHA).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    /// The full commit message (subject + body).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Display copy of the message headline, when the host provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// The commit body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Opaque host fields (`author`, `committerDate`, `tree`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CommitRecord {
    /// Creates a record carrying only a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Sets the subject.
    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    /// Sets the hash.
    #[must_use]
    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets the `author` field to a name/email object.
    #[must_use]
    pub fn with_author(self, name: &str, email: &str) -> Self {
        self.with_field("author", json!({"name": name, "email": email}))
    }

    /// Sets the `committerDate` field, formatted like `2024-05-01T10:00:00.000Z`.
    #[must_use]
    pub fn with_committer_date(self, date: DateTime<Utc>) -> Self {
        self.with_field(
            "committerDate",
            Value::String(date.to_rfc3339_opts(SecondsFormat::Millis, true)),
        )
    }

    /// Adds an opaque field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Returns the first line of the subject, falling back to the message.
    #[must_use]
    pub fn headline(&self) -> &str {
        self.subject
            .as_deref()
            .or(self.message.as_deref())
            .and_then(|text| text.lines().next())
            .unwrap_or("")
    }

    /// Returns the short hash (first 7 characters).
    #[must_use]
    pub fn short_hash(&self) -> Option<&str> {
        self.hash.as_deref().map(abbreviate)
    }
}

//! Merge-prefix normalization.

use std::sync::LazyLock;

use prtrim_commit::CommitRecord;
use regex::Regex;
use tracing::{debug, trace};

/// `Merged PR <digits>:` followed by the original text, which may span lines.
static MERGE_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)^Merged PR [0-9]+:\s*(.*)").expect("invalid regex"));

/// Returns the text following a `Merged PR <digits>:` prefix, trimmed.
///
/// Returns `None` when the prefix is missing or nothing but whitespace follows it.
#[must_use]
pub fn strip_merge_prefix(text: &str) -> Option<&str> {
    let remainder = MERGE_PREFIX_RE.captures(text)?.get(1)?.as_str().trim();
    (!remainder.is_empty()).then_some(remainder)
}

fn strip_field(field: &mut Option<String>) -> bool {
    let Some(stripped) = field.as_deref().and_then(strip_merge_prefix) else {
        return false;
    };
    *field = Some(stripped.to_owned());
    true
}

/// Returns a copy of `record` with the merge prefix removed from `message` and
/// `subject`.
///
/// Each field is matched on its own, so one may change while the other does not.
#[must_use]
pub fn normalize_record(record: &CommitRecord) -> CommitRecord {
    let mut normalized = record.clone();
    let message_changed = strip_field(&mut normalized.message);
    let subject_changed = strip_field(&mut normalized.subject);

    if message_changed || subject_changed {
        trace!(
            hash = normalized.short_hash().unwrap_or("-"),
            message_changed, subject_changed, "stripped merge prefix"
        );
    }

    normalized
}

/// Normalizes an optional record; an absent record stays absent.
#[must_use]
pub fn normalize(record: Option<&CommitRecord>) -> Option<CommitRecord> {
    record.map(normalize_record)
}

/// Normalizes every record, preserving order and length.
#[must_use]
pub fn normalize_commits(records: &[CommitRecord]) -> Vec<CommitRecord> {
    let normalized: Vec<_> = records.iter().map(normalize_record).collect();

    let rewritten = records
        .iter()
        .zip(&normalized)
        .filter(|(before, after)| before != after)
        .count();
    debug!(total = records.len(), rewritten, "normalized commits");

    normalized
}

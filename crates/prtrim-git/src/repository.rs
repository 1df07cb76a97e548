//! Git repository wrapper.

use std::path::Path;

use chrono::{TimeZone, Utc};
use git2::Repository as Git2Repo;
use prtrim_commit::CommitRecord;
use tracing::debug;

use crate::{GitError, GitResult};

/// A Git repository wrapper.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Opens a repository at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a valid Git repository.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let inner = Git2Repo::open(path).map_err(|_| GitError::NotARepo(path.to_path_buf()))?;
        Ok(Self { inner })
    }

    /// Discovers the repository from the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if no repository is found.
    pub fn discover() -> GitResult<Self> {
        let inner = Git2Repo::discover(".")?;
        Ok(Self { inner })
    }

    /// Returns the repository root path.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.workdir().unwrap_or_else(|| self.inner.path())
    }

    /// Returns all tags in the repository.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn tags(&self) -> GitResult<Vec<String>> {
        let tags = self.inner.tag_names(None)?;
        Ok(tags.iter().flatten().map(String::from).collect())
    }

    /// Returns commits since the given tag, newest first.
    ///
    /// If tag is `None`, returns all commits reachable from HEAD.
    ///
    /// # Errors
    ///
    /// Returns an error if the tag is unknown or commits cannot be read.
    pub fn commits_since(&self, tag: Option<&str>) -> GitResult<Vec<CommitRecord>> {
        let mut revwalk = self.inner.revwalk()?;
        revwalk.push_head()?;

        if let Some(tag_name) = tag {
            let tag_commit = self
                .inner
                .revparse_single(tag_name)
                .and_then(|object| object.peel_to_commit())
                .map_err(|_| GitError::TagNotFound(tag_name.to_string()))?;
            revwalk.hide(tag_commit.id())?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid?;
            let commit = self.inner.find_commit(oid)?;
            commits.push(to_record(&commit));
        }

        debug!(count = commits.len(), ?tag, "read commits");
        Ok(commits)
    }

    /// Returns the latest tag matching a version pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if tags cannot be read.
    pub fn latest_version_tag(&self, prefix: &str) -> GitResult<Option<(String, semver::Version)>> {
        let tags = self.tags()?;

        let latest = tags
            .into_iter()
            .filter_map(|t| {
                let version = semver::Version::parse(t.strip_prefix(prefix)?).ok()?;
                Some((t, version))
            })
            .max_by(|a, b| a.1.cmp(&b.1));

        Ok(latest)
    }
}

/// Builds a record from a git commit, keeping the full message intact.
fn to_record(commit: &git2::Commit<'_>) -> CommitRecord {
    let message = String::from_utf8_lossy(commit.message_bytes()).into_owned();
    let subject = message.lines().next().unwrap_or("").to_string();
    let body = commit
        .body()
        .map(str::trim)
        .filter(|body| !body.is_empty())
        .map(String::from);

    let author = commit.author();
    let mut record = CommitRecord::new(message)
        .with_subject(subject)
        .with_hash(commit.id().to_string())
        .with_author(
            author.name().unwrap_or("Unknown"),
            author.email().unwrap_or(""),
        );

    if let Some(body) = body {
        record = record.with_body(body);
    }
    if let Some(date) = Utc.timestamp_opt(commit.time().seconds(), 0).single() {
        record = record.with_committer_date(date);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository as Git2Repository, Signature};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let git2_repo = Git2Repository::init(temp_dir.path()).unwrap();

        let mut config = git2_repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let repo = Repository { inner: git2_repo };
        (temp_dir, repo)
    }

    fn create_commit(repo: &Repository, message: &str) -> git2::Oid {
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        let tree_id = {
            let mut index = repo.inner.index().unwrap();
            index.write_tree().unwrap()
        };
        let tree = repo.inner.find_tree(tree_id).unwrap();

        let parent = repo.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        repo.inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    fn create_tag(repo: &Repository, name: &str) {
        let head = repo.inner.head().unwrap().peel_to_commit().unwrap();
        let sig = Signature::now("Test User", "test@example.com").unwrap();
        repo.inner
            .tag(name, head.as_object(), &sig, name, false)
            .unwrap();
    }

    #[test]
    fn test_open_valid_repo() {
        let (temp_dir, _repo) = create_test_repo();
        assert!(Repository::open(temp_dir.path()).is_ok());
    }

    #[test]
    fn test_open_not_a_repo() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            Repository::open(temp_dir.path()),
            Err(GitError::NotARepo(_))
        ));
    }

    #[test]
    fn test_path() {
        let (temp_dir, repo) = create_test_repo();
        let expected = temp_dir.path().canonicalize().unwrap();
        let actual = repo.path().canonicalize().unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_commits_since_none() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");
        create_commit(&repo, "Second commit");
        create_commit(&repo, "Third commit");

        let commits = repo.commits_since(None).unwrap();
        assert_eq!(commits.len(), 3);
    }

    #[test]
    fn test_commits_since_tag() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");
        create_tag(&repo, "v1.0.0");
        create_commit(&repo, "Second commit");
        create_commit(&repo, "Third commit");

        let commits = repo.commits_since(Some("v1.0.0")).unwrap();
        assert_eq!(commits.len(), 2);
        assert_eq!(commits[0].headline(), "Third commit");
        assert_eq!(commits[1].headline(), "Second commit");
    }

    #[test]
    fn test_commits_since_invalid_tag() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "First commit");

        assert!(matches!(
            repo.commits_since(Some("nonexistent-tag")),
            Err(GitError::TagNotFound(_))
        ));
    }

    #[test]
    fn test_merge_commit_record_fields() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(
            &repo,
            "Merged PR 42: feat: add feature\n\nRelated work items: #7",
        );

        let commits = repo.commits_since(None).unwrap();
        let commit = &commits[0];
        assert_eq!(
            commit.message.as_deref(),
            Some("Merged PR 42: feat: add feature\n\nRelated work items: #7")
        );
        assert_eq!(
            commit.subject.as_deref(),
            Some("Merged PR 42: feat: add feature")
        );
        assert_eq!(commit.body.as_deref(), Some("Related work items: #7"));
        assert_eq!(commit.extra["author"]["name"], "Test User");
        assert_eq!(commit.extra["author"]["email"], "test@example.com");
        assert_eq!(commit.hash.as_ref().map(String::len), Some(40));

        let date = commit.extra["committerDate"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(date).is_ok());
        assert!(date.ends_with('Z'));
    }

    #[test]
    fn test_single_line_commit_has_no_body() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "fix: bug");

        let commits = repo.commits_since(None).unwrap();
        assert!(commits[0].body.is_none());
    }

    #[test]
    fn test_latest_version_tag_none() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");

        assert!(repo.latest_version_tag("v").unwrap().is_none());
    }

    #[test]
    fn test_latest_version_tag_multiple() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");
        create_tag(&repo, "v1.0.0");
        create_commit(&repo, "Another commit");
        create_tag(&repo, "v1.10.0");
        create_commit(&repo, "Yet another commit");
        create_tag(&repo, "v1.9.0");

        let (tag, version) = repo.latest_version_tag("v").unwrap().unwrap();
        assert_eq!(tag, "v1.10.0");
        assert_eq!(version, semver::Version::new(1, 10, 0));
    }

    #[test]
    fn test_latest_version_tag_ignores_other_prefixes_and_non_semver() {
        let (_temp_dir, repo) = create_test_repo();
        create_commit(&repo, "Initial commit");
        create_tag(&repo, "v1.0.0");
        create_tag(&repo, "release-2.0.0");
        create_tag(&repo, "vnot-semver");

        let (tag, _) = repo.latest_version_tag("v").unwrap().unwrap();
        assert_eq!(tag, "v1.0.0");

        let (tag, _) = repo.latest_version_tag("release-").unwrap().unwrap();
        assert_eq!(tag, "release-2.0.0");
    }
}

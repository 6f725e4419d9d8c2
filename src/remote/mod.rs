//! Remote repository API abstraction
//!
//! The publish pipeline talks to the hosting service through the
//! [RemoteRepository] trait, so the orchestration can be exercised against
//! [mock::MockRemote] as well as the real [github::GitHubClient].
//!
//! Every call takes the [RepoId] explicitly; the client holds no notion of a
//! "current" repository.

pub mod github;
pub mod mock;

pub use github::GitHubClient;
pub use mock::MockRemote;

use std::fmt;

use async_trait::async_trait;

use crate::domain::CommitSummary;
use crate::error::Result;

/// Upper bound of tags fetched per listing request. Only the first page is
/// ever requested.
pub const TAGS_PER_PAGE: u8 = 100;

/// Owner and name of the remote repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    pub owner: String,
    pub name: String,
}

impl RepoId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        RepoId {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse the `owner/name` form used by `GITHUB_REPOSITORY`
    pub fn parse(slug: &str) -> Option<Self> {
        let (owner, name) = slug.trim().split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(RepoId::new(owner, name))
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// An existing tag as listed by the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTag {
    pub name: String,
    /// Commit the tag points at
    pub sha: String,
}

/// A freshly created annotated tag object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedTagObject {
    pub tag: String,
    pub sha: String,
}

/// A freshly created reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRef {
    /// Fully qualified name, e.g. `refs/tags/v1.0.0`
    pub reference: String,
    pub url: String,
}

/// Remote operations needed to publish a tag.
///
/// Implementations must be `Send + Sync`; calls are awaited one at a time.
#[async_trait]
pub trait RemoteRepository: Send + Sync {
    /// List existing tags, at most [TAGS_PER_PAGE], in the order the remote returns them
    async fn list_tags(&self, repo: &RepoId) -> Result<Vec<RemoteTag>>;

    /// Commits reachable from `head` but not from `base`, oldest first
    async fn compare_commits(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitSummary>>;

    /// Create an annotated tag object pointing at commit `object`
    async fn create_tag(
        &self,
        repo: &RepoId,
        tag: &str,
        message: &str,
        object: &str,
    ) -> Result<CreatedTagObject>;

    /// Create reference `reference` pointing at `sha`
    async fn create_ref(&self, repo: &RepoId, reference: &str, sha: &str) -> Result<CreatedRef>;
}

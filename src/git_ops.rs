use std::path::Path;

use git2::Repository;

use crate::error::{AutotagError, Result};
use crate::remote::RepoId;

/// Read-only view of the local checkout in the workspace.
///
/// Used to fill in the triggering commit and the repository identity when the
/// runner does not provide them.
pub struct LocalCheckout {
    repo: Repository,
}

impl LocalCheckout {
    /// Discovers the git repository containing `path` (or one of its parents).
    ///
    /// # Returns
    /// * `Ok(LocalCheckout)` - Successfully opened repository
    /// * `Err` - If `path` is not inside a git repository
    pub fn discover(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|e| {
            AutotagError::config(format!(
                "Not in a git repository ({}): {}",
                path.display(),
                e.message()
            ))
        })?;
        Ok(LocalCheckout { repo })
    }

    /// Full SHA-1 of the commit HEAD points at
    pub fn head_sha(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        Ok(commit.id().to_string())
    }

    /// Owner and name parsed from the `origin` remote URL
    pub fn origin_repo(&self) -> Result<RepoId> {
        let remote = self.repo.find_remote("origin")?;
        let url = remote
            .url()
            .ok_or_else(|| AutotagError::config("Remote 'origin' has no valid URL"))?;
        parse_remote_url(url).ok_or_else(|| {
            AutotagError::config(format!(
                "Cannot determine owner/repository from remote URL '{}'",
                url
            ))
        })
    }
}

/// Extract `owner/name` from a remote URL.
///
/// Accepts `https://host/owner/name(.git)`, `ssh://git@host/owner/name(.git)`
/// and the scp-like `git@host:owner/name(.git)` form.
pub fn parse_remote_url(url: &str) -> Option<RepoId> {
    let url = url.trim().trim_end_matches('/');
    let path = if let Some((_, rest)) = url.split_once("://") {
        rest.split_once('/')?.1
    } else {
        url.split_once(':')?.1
    };

    let path = path.trim_end_matches(".git");
    let mut parts = path.rsplitn(2, '/');
    let name = parts.next()?;
    let owner = parts.next()?.rsplit('/').next()?;

    if owner.is_empty() || name.is_empty() {
        return None;
    }
    Some(RepoId::new(owner, name))
}

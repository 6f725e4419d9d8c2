//! Runner-provided context: workspace, credentials, triggering commit and repository identity

use std::env;
use std::path::PathBuf;

use tracing::debug;

use crate::error::{AutotagError, Result};
use crate::git_ops::LocalCheckout;
use crate::remote::github::DEFAULT_API_URL;
use crate::remote::RepoId;

/// Everything about the surrounding run that the publisher needs.
/// Built once at startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct RepoContext {
    pub workspace: PathBuf,
    pub token: String,
    /// Commit the new tag is bound to
    pub commit: String,
    pub repo: RepoId,
    pub api_url: String,
}

impl RepoContext {
    /// Build the context from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the context from an arbitrary variable lookup.
    ///
    /// `GITHUB_SHA` and `GITHUB_REPOSITORY` fall back to the local checkout
    /// in the workspace when unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let workspace = match var("GITHUB_WORKSPACE") {
            Some(path) => PathBuf::from(path),
            None => env::current_dir()?,
        };

        let token = var("GITHUB_TOKEN")
            .or_else(|| var("INPUT_GITHUB_TOKEN"))
            .ok_or_else(|| {
                AutotagError::config(
                    "At least one of the following environment variables is required: \
                     GITHUB_TOKEN, INPUT_GITHUB_TOKEN",
                )
            })?;

        let sha = var("GITHUB_SHA");
        let slug = var("GITHUB_REPOSITORY");
        let checkout = if sha.is_none() || slug.is_none() {
            Some(LocalCheckout::discover(&workspace)?)
        } else {
            None
        };

        let commit = match (sha, &checkout) {
            (Some(sha), _) => sha,
            (None, Some(checkout)) => {
                let sha = checkout.head_sha()?;
                debug!(%sha, "GITHUB_SHA unset, using local HEAD");
                sha
            }
            (None, None) => {
                return Err(AutotagError::config("Cannot determine the triggering commit"));
            }
        };

        let repo = match (slug, &checkout) {
            (Some(slug), _) => RepoId::parse(&slug).ok_or_else(|| {
                AutotagError::config(format!(
                    "GITHUB_REPOSITORY must have the form owner/name, got '{}'",
                    slug
                ))
            })?,
            (None, Some(checkout)) => {
                let repo = checkout.origin_repo()?;
                debug!(%repo, "GITHUB_REPOSITORY unset, using origin remote");
                repo
            }
            (None, None) => {
                return Err(AutotagError::config("Cannot determine the repository"));
            }
        };

        let api_url = var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(RepoContext {
            workspace,
            token,
            commit,
            repo,
            api_url,
        })
    }
}

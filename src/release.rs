//! The release tag aggregate
//!
//! [ReleaseTag] carries the requested tag name together with everything
//! learned about it during one publish run. Each derived value is computed
//! at most once:
//!
//! - the remote tag listing (via [RemoteTagIndex])
//! - whether the tag already exists
//! - the tag message
//!
//! `sha`, `uri` and `reference` stay empty until the corresponding remote
//! object has been created.

use tracing::{debug, info};

use crate::changelog::{self, ChangelogOptions};
use crate::domain::TagName;
use crate::error::Result;
use crate::remote::{RemoteRepository, RepoId};
use crate::tag_index::RemoteTagIndex;
use crate::ui;
use crate::warning::PublishWarning;

#[derive(Debug)]
pub struct ReleaseTag {
    name: TagName,
    index: RemoteTagIndex,
    exists: Option<bool>,
    message: Option<String>,
    sha: String,
    uri: String,
    reference: String,
}

impl ReleaseTag {
    pub fn new(
        prefix: impl Into<String>,
        version: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Self {
        ReleaseTag {
            name: TagName::new(prefix, version, suffix),
            index: RemoteTagIndex::new(),
            exists: None,
            message: None,
            sha: String::new(),
            uri: String::new(),
            reference: String::new(),
        }
    }

    pub fn name(&self) -> String {
        self.name.name()
    }

    pub fn version(&self) -> &str {
        self.name.version()
    }

    pub fn is_prerelease(&self) -> bool {
        self.name.is_prerelease()
    }

    pub fn is_build(&self) -> bool {
        self.name.is_build()
    }

    /// Set the tag message. Blank values are ignored and keep the current message.
    pub fn set_message(&mut self, value: &str) {
        if !value.trim().is_empty() {
            self.message = Some(value.to_string());
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Identifier of the created tag object; empty until created
    pub fn sha(&self) -> &str {
        &self.sha
    }

    /// API URL of the created reference; empty until created
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Fully qualified reference name; empty until created
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Whether the tag name is already taken on the remote. Answered once.
    pub async fn exists(&mut self, remote: &dyn RemoteRepository, repo: &RepoId) -> Result<bool> {
        if let Some(exists) = self.exists {
            return Ok(exists);
        }
        let name = self.name();
        let exists = self.index.contains(remote, repo, &name).await?;
        self.exists = Some(exists);
        Ok(exists)
    }

    /// The tag message, generating a changelog when none was set.
    ///
    /// Changelog failures never propagate: they are reported and the
    /// default `Version {version}` message is used instead.
    pub async fn resolve_message(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
        options: &ChangelogOptions,
    ) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }

        let version = self.name.version().to_string();
        let message =
            match changelog::generate(&mut self.index, remote, repo, &version, options).await {
                Ok(message) => message,
                Err(e) => {
                    debug!(error = %e, "changelog generation failed");
                    ui::display_warning(&PublishWarning::ChangelogUnavailable {
                        version: version.clone(),
                        reason: e.to_string(),
                    });
                    changelog::default_message(&version)
                }
            };

        self.set_message(&message);
        message
    }

    /// Create the annotated tag object for `commit` with `message`
    pub async fn create_tag_object(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
        commit: &str,
        message: &str,
    ) -> Result<()> {
        let created = remote
            .create_tag(repo, &self.name(), message, commit)
            .await?;
        info!(tag = %created.tag, sha = %created.sha, "created tag object");
        self.sha = created.sha;
        Ok(())
    }

    /// Create `refs/tags/<name>` pointing at the tag object.
    ///
    /// On failure the tag object stays on the remote and `sha` stays set;
    /// nothing is rolled back.
    pub async fn create_reference(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
    ) -> Result<()> {
        let reference = format!("refs/tags/{}", self.name());
        match remote.create_ref(repo, &reference, &self.sha).await {
            Ok(created) => {
                info!(reference = %created.reference, url = %created.url, "created reference");
                self.uri = created.url;
                self.reference = created.reference;
                Ok(())
            }
            Err(e) => {
                debug!(%reference, sha = %self.sha, %repo, "reference creation failed");
                Err(e)
            }
        }
    }
}

//! Main workflow orchestration logic
//!
//! Runs one publish attempt as a strict sequence of steps:
//!
//! 1. Resolve the version with the configured extraction strategy
//! 2. Name the tag
//! 3. Check whether the tag already exists (an existing tag ends the run successfully)
//! 4. Prepare the message (explicit message, else generated changelog)
//! 5. Create the annotated tag object
//! 6. Create the `refs/tags/<name>` reference
//!
//! Every remote call is awaited before the next step starts. Any failure
//! ends the run with a [PublishFailure] naming the step that failed.

use std::fmt;

use tracing::{debug, info};

use crate::changelog::ChangelogOptions;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::{AutotagError, Result};
use crate::release::ReleaseTag;
use crate::remote::RemoteRepository;
use crate::strategy::Strategy;
use crate::ui;
use crate::warning::PublishWarning;

/// Step of the publish sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolveVersion,
    CheckExistence,
    CreateTagObject,
    CreateReference,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::ResolveVersion => "resolve version",
            Stage::CheckExistence => "check tag existence",
            Stage::CreateTagObject => "create tag object",
            Stage::CreateReference => "create reference",
        };
        f.write_str(name)
    }
}

/// The tag a run asked for
#[derive(Debug, Clone, PartialEq)]
pub struct RequestedRelease {
    pub version: String,
    pub name: String,
    pub prerelease: bool,
    pub build: bool,
}

/// A tag and reference that now exist on the remote
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedRelease {
    pub name: String,
    pub sha: String,
    pub uri: String,
    pub reference: String,
    pub message: String,
}

/// How a run that did not fail ended
#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    Created(CreatedRelease),
    /// The tag was already present; nothing was created
    AlreadyExists,
    /// Dry run: everything was resolved, nothing was created
    DryRun { message: String },
}

/// Result of a successful publish run
#[derive(Debug, Clone, PartialEq)]
pub struct Publication {
    pub release: RequestedRelease,
    pub outcome: PublishOutcome,
}

/// A run that ended in an error
#[derive(Debug)]
pub struct PublishFailure {
    pub stage: Stage,
    pub error: AutotagError,
    /// Present when the version had been resolved before the failure
    pub release: Option<RequestedRelease>,
    /// Identifier of a tag object left on the remote without a reference
    pub orphaned_tag_sha: Option<String>,
}

impl fmt::Display for PublishFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to {}: {}", self.stage, self.error)
    }
}

impl std::error::Error for PublishFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Publishes one release tag for the repository described by a [RepoContext]
pub struct TagPublisher<'a> {
    remote: &'a dyn RemoteRepository,
    context: &'a RepoContext,
    config: &'a Config,
}

impl<'a> TagPublisher<'a> {
    pub fn new(
        remote: &'a dyn RemoteRepository,
        context: &'a RepoContext,
        config: &'a Config,
    ) -> Self {
        TagPublisher {
            remote,
            context,
            config,
        }
    }

    /// Resolve the version string from the workspace
    pub fn resolve_version(&self) -> Result<String> {
        let pattern = self.config.regex_pattern.as_deref();
        let strategy = Strategy::select(self.config.strategy.as_deref(), pattern)?;
        let root = self.config.root();

        let detail = match (strategy, pattern) {
            (Strategy::Regex, Some(p)) => {
                format!(" using the regex extraction with the /{}/im pattern.", p)
            }
            _ => format!(" using the {} extraction.", strategy),
        };

        let extracted = strategy.extract(&self.context.workspace, root, pattern)?;
        let version = extracted
            .version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| {
                AutotagError::extraction(format!("No version identified{}", detail))
            })?;

        ui::display_status(&format!("Recognized \"{}\"{}", version, detail));
        debug!(%version, %strategy, root, "detected version");
        Ok(version)
    }

    /// Run the full publish sequence
    pub async fn run(&self) -> std::result::Result<Publication, PublishFailure> {
        let fail = |stage: Stage, release: Option<&RequestedRelease>, error: AutotagError| {
            PublishFailure {
                stage,
                error,
                release: release.cloned(),
                orphaned_tag_sha: None,
            }
        };

        let version = self
            .resolve_version()
            .map_err(|e| fail(Stage::ResolveVersion, None, e))?;

        let mut tag = ReleaseTag::new(
            self.config.tag_prefix(),
            version,
            self.config.tag_suffix(),
        );
        let release = RequestedRelease {
            version: tag.version().to_string(),
            name: tag.name(),
            prerelease: tag.is_prerelease(),
            build: tag.is_build(),
        };
        ui::display_requested_tag(&release.name, release.prerelease, release.build);

        let repo = &self.context.repo;
        let exists = tag
            .exists(self.remote, repo)
            .await
            .map_err(|e| fail(Stage::CheckExistence, Some(&release), e))?;
        if exists {
            ui::display_warning(&PublishWarning::TagAlreadyExists {
                tag: release.name.clone(),
            });
            return Ok(Publication {
                release,
                outcome: PublishOutcome::AlreadyExists,
            });
        }

        tag.set_message(self.config.tag_message());
        let head = self
            .config
            .changelog_head
            .clone()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| self.context.commit.clone());
        let options = ChangelogOptions::new(self.config.commit_message_template.clone(), head);
        let message = tag.resolve_message(self.remote, repo, &options).await;

        if self.config.dry_run() {
            ui::display_status(&format!(
                "Dry run: would create {} at {}",
                release.name, self.context.commit
            ));
            return Ok(Publication {
                release,
                outcome: PublishOutcome::DryRun { message },
            });
        }

        tag.create_tag_object(self.remote, repo, &self.context.commit, &message)
            .await
            .map_err(|e| fail(Stage::CreateTagObject, Some(&release), e))?;
        ui::display_status(&format!("Created new tag: {}", release.name));

        if let Err(e) = tag.create_reference(self.remote, repo).await {
            ui::display_warning(&PublishWarning::OrphanedTagObject {
                tag: release.name.clone(),
                sha: tag.sha().to_string(),
                reference: format!("refs/tags/{}", release.name),
            });
            let mut failure = fail(Stage::CreateReference, Some(&release), e);
            failure.orphaned_tag_sha = Some(tag.sha().to_string());
            return Err(failure);
        }

        ui::display_success(&format!(
            "Reference {} available at {}",
            tag.reference(),
            tag.uri()
        ));
        info!(tag = %release.name, sha = tag.sha(), "published tag");

        Ok(Publication {
            outcome: PublishOutcome::Created(CreatedRelease {
                name: release.name.clone(),
                sha: tag.sha().to_string(),
                uri: tag.uri().to_string(),
                reference: tag.reference().to_string(),
                message,
            }),
            release,
        })
    }
}

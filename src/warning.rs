use std::fmt;

/// Non-fatal conditions met while publishing a tag.
/// These are reported to the user but never abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum PublishWarning {
    /// The requested tag is already present on the remote
    TagAlreadyExists { tag: String },
    /// The changelog could not be generated; the default message is used instead
    ChangelogUnavailable { version: String, reason: String },
    /// The tag object was created but its reference was not
    OrphanedTagObject {
        tag: String,
        sha: String,
        reference: String,
    },
}

impl fmt::Display for PublishWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishWarning::TagAlreadyExists { tag } => {
                write!(f, "\"{}\" tag already exists.", tag)
            }
            PublishWarning::ChangelogUnavailable { version, reason } => {
                write!(
                    f,
                    "Failed to generate changelog from commits: {} (using \"Version {}\")",
                    reason, version
                )
            }
            PublishWarning::OrphanedTagObject {
                tag,
                sha,
                reference,
            } => {
                let short_sha = sha.get(..7).unwrap_or(sha);
                write!(
                    f,
                    "Tag object '{}' ({}) was created but reference '{}' was not",
                    tag, short_sha, reference
                )
            }
        }
    }
}

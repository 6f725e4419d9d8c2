//! Step outputs
//!
//! Every run produces the full set of outputs, including failed runs, so a
//! workflow can always inspect `tagcreated` instead of the exit status.

use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::cli::orchestration::{Publication, PublishFailure, PublishOutcome, RequestedRelease};
use crate::error::Result;

const DELIMITER: &str = "AUTOTAG_EOF";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutputs {
    pub version: String,
    pub tagrequested: String,
    pub prerelease: String,
    pub build: String,
    pub tagname: String,
    pub tagsha: String,
    pub taguri: String,
    pub tagmessage: String,
    pub tagref: String,
    pub tagcreated: String,
}

fn yes_no(flag: bool) -> String {
    let value = if flag { "yes" } else { "no" };
    value.to_string()
}

impl ActionOutputs {
    /// Outputs with every tag field empty and `tagcreated=no`
    pub fn not_created(release: Option<&RequestedRelease>) -> Self {
        ActionOutputs {
            version: release.map(|r| r.version.clone()).unwrap_or_default(),
            tagrequested: release.map(|r| r.name.clone()).unwrap_or_default(),
            prerelease: yes_no(release.map(|r| r.prerelease).unwrap_or(false)),
            build: yes_no(release.map(|r| r.build).unwrap_or(false)),
            tagcreated: yes_no(false),
            ..ActionOutputs::default()
        }
    }

    pub fn from_result(result: &std::result::Result<Publication, PublishFailure>) -> Self {
        match result {
            Ok(publication) => Self::from_publication(publication),
            Err(failure) => Self::not_created(failure.release.as_ref()),
        }
    }

    pub fn from_publication(publication: &Publication) -> Self {
        let base = Self::not_created(Some(&publication.release));
        match &publication.outcome {
            PublishOutcome::Created(created) => ActionOutputs {
                tagname: created.name.clone(),
                tagsha: created.sha.clone(),
                taguri: created.uri.clone(),
                tagmessage: created.message.clone(),
                tagref: created.reference.clone(),
                tagcreated: yes_no(true),
                ..base
            },
            PublishOutcome::DryRun { message } => ActionOutputs {
                tagmessage: message.clone(),
                ..base
            },
            PublishOutcome::AlreadyExists => base,
        }
    }

    /// Output names and values in a stable order
    pub fn pairs(&self) -> [(&'static str, &str); 10] {
        [
            ("version", self.version.as_str()),
            ("tagrequested", self.tagrequested.as_str()),
            ("prerelease", self.prerelease.as_str()),
            ("build", self.build.as_str()),
            ("tagname", self.tagname.as_str()),
            ("tagsha", self.tagsha.as_str()),
            ("taguri", self.taguri.as_str()),
            ("tagmessage", self.tagmessage.as_str()),
            ("tagref", self.tagref.as_str()),
            ("tagcreated", self.tagcreated.as_str()),
        ]
    }

    /// Render in the `GITHUB_OUTPUT` file format.
    ///
    /// Single-line values use `name=value`; multi-line values use the
    /// `name<<DELIMITER` heredoc form.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (name, value) in self.pairs() {
            if value.contains('\n') || value.contains('\r') {
                let mut delimiter = DELIMITER.to_string();
                while value.contains(&delimiter) {
                    delimiter.push('_');
                }
                out.push_str(&format!(
                    "{}<<{}\n{}\n{}\n",
                    name, delimiter, value, delimiter
                ));
            } else {
                out.push_str(&format!("{}={}\n", name, value));
            }
        }
        out
    }

    /// Append the outputs to the file at `path`
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }

    /// Write to the file named by `GITHUB_OUTPUT`, or to stdout when unset
    pub fn emit(&self) -> Result<()> {
        match env::var_os("GITHUB_OUTPUT").filter(|p| !p.is_empty()) {
            Some(path) => self.write_to(Path::new(&path)),
            None => {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                handle.write_all(self.render().as_bytes())?;
                Ok(())
            }
        }
    }
}

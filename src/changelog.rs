//! Changelog synthesis from the commits since the most recent tag
//!
//! A user template may reference `{{number}}`, `{{message}}`, `{{author}}` and
//! `{{sha}}` (case-insensitive, one optional space inside each brace pair).
//! Without a template a numbered list is produced.

use regex::{Captures, RegexBuilder};

use crate::domain::CommitSummary;
use crate::error::Result;
use crate::remote::{RemoteRepository, RepoId};
use crate::tag_index::RemoteTagIndex;

const PLACEHOLDER_PATTERN: &str = r"\{\{\s?(number|message|author|sha)\s?\}\}";

/// Inputs of changelog generation besides the remote itself
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogOptions {
    /// Per-commit template; blank means the built-in list format
    pub template: Option<String>,
    /// Revision the comparison runs up to
    pub head: String,
}

impl ChangelogOptions {
    pub fn new(template: Option<String>, head: impl Into<String>) -> Self {
        ChangelogOptions {
            template,
            head: head.into(),
        }
    }

    fn template(&self) -> Option<&str> {
        self.template
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Message used whenever no changelog can be produced
pub fn default_message(version: &str) -> String {
    format!("Version {}", version)
}

/// Build the tag message from the commits between the latest tag and `options.head`.
///
/// Without any existing tag, or when the range is empty, the default message is
/// returned. Remote failures are propagated; callers decide how to degrade.
pub async fn generate(
    index: &mut RemoteTagIndex,
    remote: &dyn RemoteRepository,
    repo: &RepoId,
    version: &str,
    options: &ChangelogOptions,
) -> Result<String> {
    let Some(latest) = index.latest(remote, repo).await? else {
        return Ok(default_message(version));
    };

    let commits = remote
        .compare_commits(repo, &latest.name, &options.head)
        .await?;

    let rendered = render(&commits, options.template());
    if rendered.trim().is_empty() {
        Ok(default_message(version))
    } else {
        Ok(rendered)
    }
}

/// Render commits with `template`, or with the built-in format when `None`
pub fn render(commits: &[CommitSummary], template: Option<&str>) -> String {
    match template {
        Some(template) => commits
            .iter()
            .enumerate()
            .map(|(i, commit)| render_entry(template, i + 1, commit))
            .collect(),
        None => commits
            .iter()
            .enumerate()
            .map(|(i, commit)| default_entry(i + 1, commit))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

fn render_entry(template: &str, number: usize, commit: &CommitSummary) -> String {
    let rendered = match RegexBuilder::new(PLACEHOLDER_PATTERN)
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re
            .replace_all(template, |caps: &Captures| {
                match caps[1].to_lowercase().as_str() {
                    "number" => number.to_string(),
                    "message" => commit.message.clone(),
                    "author" => commit.author_login().to_string(),
                    _ => commit.sha.clone(),
                }
            })
            .into_owned(),
        Err(_) => template.to_string(),
    };
    format!("{}\n", rendered.trim())
}

fn default_entry(number: usize, commit: &CommitSummary) -> String {
    let lead = if number == 1 { "\n" } else { "" };
    let author = commit
        .author
        .as_deref()
        .map(|login| format!(" ({})", login))
        .unwrap_or_default();
    format!(
        "{}{}) {}{}\n(SHA: {})\n",
        lead, number, commit.message, author, commit.sha
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::{MockOperation, MockRemote};

    fn commits() -> Vec<CommitSummary> {
        vec![
            CommitSummary::new("aaa111", "feat: add login").with_author("alice"),
            CommitSummary::new("bbb222", "fix: typo"),
        ]
    }

    fn repo() -> RepoId {
        RepoId::new("octo", "app")
    }

    #[test]
    fn test_template_renders_one_line_per_commit() {
        let out = render(&commits(), Some("{{number}}: {{message}} ({{author}})"));
        assert_eq!(out, "1: feat: add login (alice)\n2: fix: typo ()\n");
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_template_placeholders_are_case_insensitive_with_spaces() {
        let out = render(&commits()[..1], Some("{{ SHA }} by {{Author}}"));
        assert_eq!(out, "aaa111 by alice\n");
    }

    #[test]
    fn test_template_values_are_inserted_literally() {
        let commit = CommitSummary::new("ccc333", "price $1 {{sha}}");
        let out = render(&[commit], Some("{{message}}"));
        assert_eq!(out, "price $1 {{sha}}\n");
    }

    #[test]
    fn test_template_entry_is_trimmed() {
        let out = render(&commits()[1..], Some("  - {{message}}  "));
        assert_eq!(out, "- fix: typo\n");
    }

    #[test]
    fn test_default_format() {
        let out = render(&commits(), None);
        assert_eq!(
            out,
            "\n1) feat: add login (alice)\n(SHA: aaa111)\n\n2) fix: typo\n(SHA: bbb222)\n"
        );
    }

    #[test]
    fn test_blank_template_uses_default_format() {
        let options = ChangelogOptions::new(Some("   ".to_string()), "main");
        assert_eq!(options.template(), None);
    }

    #[tokio::test]
    async fn test_generate_without_tags_uses_default_message() {
        let remote = MockRemote::new();
        let mut index = RemoteTagIndex::new();
        let options = ChangelogOptions::new(None, "main");

        let message = generate(&mut index, &remote, &repo(), "1.0.0", &options)
            .await
            .unwrap();
        assert_eq!(message, "Version 1.0.0");
        assert_eq!(remote.compare_calls(), 0);
    }

    #[tokio::test]
    async fn test_generate_compares_latest_tag_with_head() {
        let remote = MockRemote::new()
            .with_tag("v1.1.0", "x")
            .with_tag("v1.0.0", "y")
            .with_commits(commits());
        let mut index = RemoteTagIndex::new();
        let options = ChangelogOptions::new(Some("{{number}} {{sha}}".to_string()), "deadbeef");

        let message = generate(&mut index, &remote, &repo(), "1.2.0", &options)
            .await
            .unwrap();
        assert_eq!(message, "1 aaa111\n2 bbb222\n");
        assert_eq!(
            remote.compared(),
            vec![("v1.1.0".to_string(), "deadbeef".to_string())]
        );
    }

    #[tokio::test]
    async fn test_generate_with_empty_range_uses_default_message() {
        let remote = MockRemote::new().with_tag("v1.0.0", "x");
        let mut index = RemoteTagIndex::new();
        let options = ChangelogOptions::new(None, "main");

        let message = generate(&mut index, &remote, &repo(), "1.0.1", &options)
            .await
            .unwrap();
        assert_eq!(message, "Version 1.0.1");
    }

    #[tokio::test]
    async fn test_generate_propagates_compare_failure() {
        let remote = MockRemote::new()
            .with_tag("v1.0.0", "x")
            .failing(MockOperation::CompareCommits);
        let mut index = RemoteTagIndex::new();
        let options = ChangelogOptions::new(None, "main");

        assert!(generate(&mut index, &remote, &repo(), "1.0.1", &options)
            .await
            .is_err());
    }
}

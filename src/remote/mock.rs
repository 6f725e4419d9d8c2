use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CreatedRef, CreatedTagObject, RemoteRepository, RemoteTag, RepoId};
use crate::domain::CommitSummary;
use crate::error::{AutotagError, Result};

/// Remote operation a [MockRemote] can be told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockOperation {
    ListTags,
    CompareCommits,
    CreateTag,
    CreateRef,
}

/// In-memory remote for testing without network access.
///
/// Records how often each operation is called and what was created.
#[derive(Default)]
pub struct MockRemote {
    tags: Vec<RemoteTag>,
    commits: Vec<CommitSummary>,
    failing: Vec<MockOperation>,
    list_calls: AtomicUsize,
    compare_calls: AtomicUsize,
    create_tag_calls: AtomicUsize,
    create_ref_calls: AtomicUsize,
    compared: Mutex<Vec<(String, String)>>,
    created_tags: Mutex<Vec<(String, String, String)>>,
    created_refs: Mutex<Vec<(String, String)>>,
}

impl MockRemote {
    /// Create a new empty mock remote
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an existing tag; tags are listed in insertion order
    pub fn with_tag(mut self, name: impl Into<String>, sha: impl Into<String>) -> Self {
        self.tags.push(RemoteTag {
            name: name.into(),
            sha: sha.into(),
        });
        self
    }

    /// Commits returned by every comparison
    pub fn with_commits(mut self, commits: Vec<CommitSummary>) -> Self {
        self.commits = commits;
        self
    }

    /// Make `operation` fail with a remote error
    pub fn failing(mut self, operation: MockOperation) -> Self {
        self.failing.push(operation);
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn compare_calls(&self) -> usize {
        self.compare_calls.load(Ordering::SeqCst)
    }

    pub fn create_tag_calls(&self) -> usize {
        self.create_tag_calls.load(Ordering::SeqCst)
    }

    pub fn create_ref_calls(&self) -> usize {
        self.create_ref_calls.load(Ordering::SeqCst)
    }

    /// `(base, head)` pairs passed to compare_commits
    pub fn compared(&self) -> Vec<(String, String)> {
        self.compared.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// `(tag, message, object)` triples passed to create_tag
    pub fn created_tags(&self) -> Vec<(String, String, String)> {
        self.created_tags.lock().map(|c| c.clone()).unwrap_or_default()
    }

    /// `(reference, sha)` pairs passed to create_ref
    pub fn created_refs(&self) -> Vec<(String, String)> {
        self.created_refs.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn check(&self, operation: MockOperation) -> Result<()> {
        if self.failing.contains(&operation) {
            Err(AutotagError::remote(format!("mock failure: {:?}", operation)))
        } else {
            Ok(())
        }
    }
}

fn record<T>(log: &Mutex<Vec<T>>, entry: T) {
    if let Ok(mut log) = log.lock() {
        log.push(entry);
    }
}

#[async_trait]
impl RemoteRepository for MockRemote {
    async fn list_tags(&self, _repo: &RepoId) -> Result<Vec<RemoteTag>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockOperation::ListTags)?;
        Ok(self.tags.clone())
    }

    async fn compare_commits(
        &self,
        _repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitSummary>> {
        self.compare_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockOperation::CompareCommits)?;
        record(&self.compared, (base.to_string(), head.to_string()));
        Ok(self.commits.clone())
    }

    async fn create_tag(
        &self,
        _repo: &RepoId,
        tag: &str,
        message: &str,
        object: &str,
    ) -> Result<CreatedTagObject> {
        let call = self.create_tag_calls.fetch_add(1, Ordering::SeqCst) + 1;
        self.check(MockOperation::CreateTag)?;
        record(
            &self.created_tags,
            (tag.to_string(), message.to_string(), object.to_string()),
        );
        Ok(CreatedTagObject {
            tag: tag.to_string(),
            sha: format!("tagobject{}", call),
        })
    }

    async fn create_ref(&self, repo: &RepoId, reference: &str, sha: &str) -> Result<CreatedRef> {
        self.create_ref_calls.fetch_add(1, Ordering::SeqCst);
        self.check(MockOperation::CreateRef)?;
        record(&self.created_refs, (reference.to_string(), sha.to_string()));
        Ok(CreatedRef {
            reference: reference.to_string(),
            url: format!(
                "https://api.github.com/repos/{}/git/{}",
                repo, reference
            ),
        })
    }
}

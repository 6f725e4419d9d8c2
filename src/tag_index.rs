use tracing::debug;

use crate::error::Result;
use crate::remote::{RemoteRepository, RemoteTag, RepoId};

/// Lazily fetched view of the remote's existing tags.
///
/// The listing is requested on first access and kept for the lifetime of
/// the index; once populated it is never fetched again. Only the first page
/// of tags is ever seen (see [crate::remote::TAGS_PER_PAGE]).
#[derive(Debug, Default)]
pub struct RemoteTagIndex {
    tags: Option<Vec<RemoteTag>>,
}

impl RemoteTagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing tags in the order the remote returned them
    pub async fn tags(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
    ) -> Result<&[RemoteTag]> {
        if self.tags.is_none() {
            let fetched = remote.list_tags(repo).await?;
            debug!(count = fetched.len(), %repo, "fetched remote tags");
            self.tags = Some(fetched);
        }
        Ok(self.tags.as_deref().unwrap_or_default())
    }

    /// Most recent tag, taken as the first entry of the listing
    pub async fn latest(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
    ) -> Result<Option<RemoteTag>> {
        Ok(self.tags(remote, repo).await?.first().cloned())
    }

    /// Linear scan for an exact name match
    pub async fn contains(
        &mut self,
        remote: &dyn RemoteRepository,
        repo: &RepoId,
        name: &str,
    ) -> Result<bool> {
        Ok(self.tags(remote, repo).await?.iter().any(|t| t.name == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::{MockOperation, MockRemote};

    fn repo() -> RepoId {
        RepoId::new("octo", "app")
    }

    #[tokio::test]
    async fn test_listing_is_fetched_once() {
        let remote = MockRemote::new().with_tag("v1.1.0", "b").with_tag("v1.0.0", "a");
        let mut index = RemoteTagIndex::new();

        assert!(index.contains(&remote, &repo(), "v1.0.0").await.unwrap());
        assert!(!index.contains(&remote, &repo(), "v2.0.0").await.unwrap());
        assert_eq!(index.tags(&remote, &repo()).await.unwrap().len(), 2);
        assert_eq!(remote.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_latest_is_first_listed() {
        let remote = MockRemote::new().with_tag("v0.9.0", "old").with_tag("v1.0.0", "new");
        let mut index = RemoteTagIndex::new();

        let latest = index.latest(&remote, &repo()).await.unwrap().unwrap();
        assert_eq!(latest.name, "v0.9.0");
    }

    #[tokio::test]
    async fn test_latest_of_empty_listing() {
        let remote = MockRemote::new();
        let mut index = RemoteTagIndex::new();
        assert_eq!(index.latest(&remote, &repo()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failed_listing_is_retried_on_next_access() {
        let remote = MockRemote::new().failing(MockOperation::ListTags);
        let mut index = RemoteTagIndex::new();

        assert!(index.tags(&remote, &repo()).await.is_err());
        assert!(index.tags(&remote, &repo()).await.is_err());
        assert_eq!(remote.list_calls(), 2);
    }
}

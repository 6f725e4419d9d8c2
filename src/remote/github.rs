use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{CreatedRef, CreatedTagObject, RemoteRepository, RemoteTag, RepoId, TAGS_PER_PAGE};
use crate::domain::CommitSummary;
use crate::error::{AutotagError, Result};

/// Public GitHub REST endpoint
pub const DEFAULT_API_URL: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("autotag/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// [RemoteRepository] backed by the GitHub REST API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
    token: String,
}

#[derive(Debug, Deserialize)]
struct TagEntry {
    name: String,
    commit: ObjectRef,
}

#[derive(Debug, Deserialize)]
struct ObjectRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct Comparison {
    #[serde(default)]
    commits: Vec<ComparedCommit>,
}

#[derive(Debug, Deserialize)]
struct ComparedCommit {
    sha: String,
    commit: CommitDetail,
    author: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct CommitDetail {
    message: String,
}

#[derive(Debug, Deserialize)]
struct Account {
    login: Option<String>,
}

#[derive(Debug, Serialize)]
struct NewTagObject<'a> {
    tag: &'a str,
    message: &'a str,
    object: &'a str,
    #[serde(rename = "type")]
    object_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct TagObject {
    tag: String,
    sha: String,
}

#[derive(Debug, Serialize)]
struct NewRef<'a> {
    #[serde(rename = "ref")]
    reference: &'a str,
    sha: &'a str,
}

#[derive(Debug, Deserialize)]
struct GitRef {
    #[serde(rename = "ref")]
    reference: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

impl GitHubClient {
    /// Client for api.github.com
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Client for a custom endpoint (GitHub Enterprise, or a test server)
    pub fn with_base_url(token: impl Into<String>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AutotagError::config(format!("Invalid API URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AutotagError::config(format!(
                "Invalid API URL '{}': not a base URL",
                base_url
            )));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(GitHubClient {
            http,
            base_url,
            token: token.into(),
        })
    }

    fn endpoint(&self, repo: &RepoId, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in the constructor
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .extend(["repos", repo.owner.as_str(), repo.name.as_str()])
                .extend(segments);
        }
        url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "GitHub API request");
        self.http.request(method, url).bearer_auth(&self.token)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or(body);
            return Err(AutotagError::remote(format!(
                "GitHub API returned {}: {}",
                status, message
            )));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RemoteRepository for GitHubClient {
    async fn list_tags(&self, repo: &RepoId) -> Result<Vec<RemoteTag>> {
        let url = self.endpoint(repo, &["tags"]);
        let request = self
            .request(Method::GET, url)
            .query(&[("per_page", TAGS_PER_PAGE)]);
        let entries: Vec<TagEntry> = self.send(request).await?;

        Ok(entries
            .into_iter()
            .map(|entry| RemoteTag {
                name: entry.name,
                sha: entry.commit.sha,
            })
            .collect())
    }

    async fn compare_commits(
        &self,
        repo: &RepoId,
        base: &str,
        head: &str,
    ) -> Result<Vec<CommitSummary>> {
        let range = format!("{}...{}", base, head);
        let url = self.endpoint(repo, &["compare", range.as_str()]);
        let comparison: Comparison = self.send(self.request(Method::GET, url)).await?;

        Ok(comparison
            .commits
            .into_iter()
            .map(|c| CommitSummary {
                sha: c.sha,
                message: c.commit.message,
                author: c.author.and_then(|a| a.login),
            })
            .collect())
    }

    async fn create_tag(
        &self,
        repo: &RepoId,
        tag: &str,
        message: &str,
        object: &str,
    ) -> Result<CreatedTagObject> {
        let url = self.endpoint(repo, &["git", "tags"]);
        let body = NewTagObject {
            tag,
            message,
            object,
            object_type: "commit",
        };
        let created: TagObject = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;

        Ok(CreatedTagObject {
            tag: created.tag,
            sha: created.sha,
        })
    }

    async fn create_ref(&self, repo: &RepoId, reference: &str, sha: &str) -> Result<CreatedRef> {
        let url = self.endpoint(repo, &["git", "refs"]);
        let body = NewRef { reference, sha };
        let created: GitRef = self
            .send(self.request(Method::POST, url).json(&body))
            .await?;

        Ok(CreatedRef {
            reference: created.reference,
            url: created.url,
        })
    }
}

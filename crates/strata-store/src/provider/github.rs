//! GitHub repository backend.
//!
//! Implements [`RepoProvider`] over the GitHub REST v3 contents and commits
//! APIs. File content crosses the wire base64-encoded; commit listings are
//! paginated and followed until exhausted so history scans see the full
//! history, not the first page.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{DateTime, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use async_trait::async_trait;

use super::{CommitInfo, EntryKind, RepoEntry, RepoFile, RepoProvider};
use crate::error::ProviderError;

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "strata-config";

/// Commits per page when listing history.
const COMMITS_PER_PAGE: usize = 100;

/// GitHub-backed repository provider.
pub struct GitHubProvider {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token or GitHub App token
    token: String,
    /// Repository owner (user or organization)
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise and tests)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubProvider")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubProvider {
    /// Creates a provider for a repository on github.com.
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self::with_api_base(token, owner, repo, DEFAULT_API_BASE)
    }

    /// Creates a provider with a custom API base URL (GitHub Enterprise,
    /// or a mock server in tests).
    pub fn with_api_base(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.into(),
        }
    }

    /// Creates a provider from a repository spec: either `owner/repo` or a
    /// full GitHub URL (`https://github.com/owner/repo.git`,
    /// `git@github.com:owner/repo.git`).
    pub fn from_repo_spec(token: impl Into<String>, spec: &str) -> Option<Self> {
        Self::from_repo_spec_with_api_base(token, spec, DEFAULT_API_BASE)
    }

    /// Like [`from_repo_spec`](Self::from_repo_spec) with a custom API base.
    pub fn from_repo_spec_with_api_base(
        token: impl Into<String>,
        spec: &str,
        api_base: impl Into<String>,
    ) -> Option<Self> {
        let (owner, repo) = parse_repo_spec(spec)?;
        Some(Self::with_api_base(token, owner, repo, api_base))
    }

    /// Returns the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| ProviderError::AuthFailed("token contains invalid characters".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static("2022-11-28"),
        );
        Ok(headers)
    }

    /// URL for the contents endpoint of a path.
    fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// URL for the commit-list endpoint.
    fn commits_url(&self) -> String {
        format!("{}/repos/{}/{}/commits", self.api_base, self.owner, self.repo)
    }

    /// Maps a non-success response onto the provider taxonomy.
    async fn error_for(&self, response: Response) -> ProviderError {
        let status = response.status();
        let message = match response.json::<ApiErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => "Unknown error".to_string(),
        };

        match status {
            StatusCode::UNAUTHORIZED => {
                ProviderError::AuthFailed("invalid or expired token".into())
            }
            StatusCode::FORBIDDEN => {
                ProviderError::AuthFailed(format!("permission denied: {message}"))
            }
            StatusCode::NOT_FOUND => ProviderError::NotFound(message),
            StatusCode::CONFLICT => ProviderError::Conflict(message),
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
            _ => ProviderError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }

    async fn parse_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();
        response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(format!("status {status}: {e}")))
    }
}

#[async_trait]
impl RepoProvider for GitHubProvider {
    async fn get_file(&self, path: &str, reference: &str) -> Result<RepoFile, ProviderError> {
        let response = self
            .client
            .get(self.contents_url(path))
            .headers(self.headers()?)
            .query(&[("ref", reference)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }

        let file: ContentFile = self.parse_json(response).await?;
        let content = decode_content(&file.content.unwrap_or_default())?;
        Ok(RepoFile {
            content,
            sha: file.sha,
        })
    }

    async fn create_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
    ) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content.as_bytes()),
            "branch": branch,
        });

        let response = self
            .client
            .put(self.contents_url(path))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            // Creating over an existing path comes back as a validation
            // error ("sha wasn't supplied"), not a conflict.
            return Err(match self.error_for(response).await {
                ProviderError::Api { status: 422, message } => {
                    ProviderError::AlreadyExists(message)
                }
                other => other,
            });
        }

        let written: WriteResponse = self.parse_json(response).await?;
        Ok(written.commit.sha)
    }

    async fn update_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        content: &str,
        sha: &str,
    ) -> Result<String, ProviderError> {
        let body = serde_json::json!({
            "message": message,
            "content": BASE64.encode(content.as_bytes()),
            "branch": branch,
            "sha": sha,
        });

        let response = self
            .client
            .put(self.contents_url(path))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }

        let written: WriteResponse = self.parse_json(response).await?;
        Ok(written.commit.sha)
    }

    async fn delete_file(
        &self,
        path: &str,
        branch: &str,
        message: &str,
        sha: &str,
    ) -> Result<(), ProviderError> {
        let body = serde_json::json!({
            "message": message,
            "branch": branch,
            "sha": sha,
        });

        let response = self
            .client
            .delete(self.contents_url(path))
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }
        Ok(())
    }

    async fn list_commits(
        &self,
        path: &str,
        branch: &str,
    ) -> Result<Vec<CommitInfo>, ProviderError> {
        let mut commits = Vec::new();
        let mut page = 1usize;

        loop {
            let per_page = COMMITS_PER_PAGE.to_string();
            let page_number = page.to_string();
            let response = self
                .client
                .get(self.commits_url())
                .headers(self.headers()?)
                .query(&[
                    ("sha", branch),
                    ("path", path),
                    ("per_page", per_page.as_str()),
                    ("page", page_number.as_str()),
                ])
                .send()
                .await
                .map_err(|e| ProviderError::Network(e.to_string()))?;

            if !response.status().is_success() {
                return Err(self.error_for(response).await);
            }

            let batch: Vec<CommitItem> = self.parse_json(response).await?;
            let batch_len = batch.len();
            commits.extend(batch.into_iter().map(CommitItem::into_info));

            if batch_len < COMMITS_PER_PAGE {
                break;
            }
            page += 1;
        }

        Ok(commits)
    }

    async fn list_directory(
        &self,
        path: &str,
        reference: &str,
    ) -> Result<Vec<RepoEntry>, ProviderError> {
        let response = self
            .client
            .get(self.contents_url(path))
            .headers(self.headers()?)
            .query(&[("ref", reference)])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(self.error_for(response).await);
        }

        let entries: Vec<DirEntry> = self.parse_json(response).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                let kind = match entry.kind.as_str() {
                    "file" => EntryKind::File,
                    "dir" => EntryKind::Dir,
                    // symlinks, submodules: not configs
                    _ => return None,
                };
                Some(RepoEntry {
                    name: entry.name,
                    path: entry.path,
                    kind,
                })
            })
            .collect())
    }
}

/// Decodes GitHub's base64 file content (which embeds newlines).
fn decode_content(raw: &str) -> Result<String, ProviderError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(cleaned)
        .map_err(|e| ProviderError::Decode(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes).map_err(|e| ProviderError::Decode(format!("content is not UTF-8: {e}")))
}

/// Parses `owner/repo` from a repo spec or GitHub URL.
fn parse_repo_spec(spec: &str) -> Option<(String, String)> {
    let spec = spec.trim().trim_end_matches('/');
    let tail = if let Some((_, rest)) = spec.rsplit_once("github.com/") {
        rest
    } else if let Some((_, rest)) = spec.rsplit_once("github.com:") {
        rest
    } else {
        spec
    };
    let tail = tail.strip_suffix(".git").unwrap_or(tail);

    let (owner, repo) = tail.split_once('/')?;
    if owner.is_empty() || repo.is_empty() || repo.contains('/') {
        return None;
    }
    Some((owner.to_string(), repo.to_string()))
}

// ============================================
// Wire types
// ============================================

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ContentFile {
    sha: String,
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    commit: CommitRef,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

#[derive(Debug, Deserialize)]
struct CommitItem {
    sha: String,
    commit: CommitBody,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
    message: String,
    author: Option<CommitSignature>,
}

#[derive(Debug, Deserialize)]
struct CommitSignature {
    name: String,
    date: DateTime<Utc>,
}

impl CommitItem {
    fn into_info(self) -> CommitInfo {
        let (author, date) = match self.commit.author {
            Some(sig) => (sig.name, sig.date),
            None => ("unknown".to_string(), DateTime::<Utc>::UNIX_EPOCH),
        };
        CommitInfo {
            sha: self.sha,
            message: self.commit.message,
            author,
            date,
        }
    }
}

#[derive(Debug, Deserialize)]
struct DirEntry {
    name: String,
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

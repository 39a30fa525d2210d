//! GitHub REST client for commit to pull request lookups

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument};

use chronicler_core::error::ForgeError;

use crate::lookup::PullRequestLookup;

/// Default GitHub API base URL
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

const USER_AGENT_VALUE: &str = concat!("chronicler/", env!("CARGO_PKG_VERSION"));
const API_VERSION: &str = "2022-11-28";

/// GitHub API client scoped to one repository
pub struct GitHubClient {
    client: Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

/// Pull request as returned by the "list pull requests associated with a
/// commit" endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PullSummary {
    pub number: u64,
    #[serde(default)]
    pub merged_at: Option<String>,
}

impl GitHubClient {
    /// Create a client for `repository` (`owner/name`)
    pub fn new(
        api_base: impl Into<String>,
        repository: &str,
        token: Option<String>,
    ) -> Result<Self, ForgeError> {
        let (owner, repo) = parse_repository(repository)?;
        Ok(Self {
            client: Client::new(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// URL of the pulls-for-commit endpoint
    pub fn commit_pulls_url(&self, sha: &str) -> String {
        format!(
            "{}/repos/{}/{}/commits/{}/pulls",
            self.api_base, self.owner, self.repo, sha
        )
    }
}

#[async_trait]
impl PullRequestLookup for GitHubClient {
    #[instrument(skip(self))]
    async fn pull_request_for_commit(&self, sha: &str) -> Result<Option<u64>, ForgeError> {
        let url = self.commit_pulls_url(sha);
        debug!(url = %url, "GitHub API request");

        let mut request = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| ForgeError::Http(e.to_string()))?;
        let status = response.status();

        // unknown commit (not pushed yet, or force-pushed away)
        if status == StatusCode::NOT_FOUND || status == StatusCode::UNPROCESSABLE_ENTITY {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ForgeError::Http(e.to_string()))?;

        if !status.is_success() {
            return Err(ForgeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let pulls: Vec<PullSummary> = serde_json::from_str(&body)?;
        Ok(pick_pull_request(&pulls))
    }
}

/// Split `owner/name` into its parts
pub fn parse_repository(slug: &str) -> Result<(&str, &str), ForgeError> {
    match slug.trim().split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner, repo))
        }
        _ => Err(ForgeError::InvalidRepository(slug.to_string())),
    }
}

/// Prefer a merged pull request, otherwise the first one listed
pub fn pick_pull_request(pulls: &[PullSummary]) -> Option<u64> {
    pulls
        .iter()
        .find(|p| p.merged_at.is_some())
        .or_else(|| pulls.first())
        .map(|p| p.number)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repository() {
        assert_eq!(parse_repository("octocat/hello").unwrap(), ("octocat", "hello"));
        assert!(parse_repository("octocat").is_err());
        assert!(parse_repository("/hello").is_err());
        assert!(parse_repository("a/b/c").is_err());
    }

    #[test]
    fn test_commit_pulls_url() {
        let client =
            GitHubClient::new("https://ghe.example.com/api/v3/", "octo/repo", None).unwrap();
        assert_eq!(
            client.commit_pulls_url("abc123"),
            "https://ghe.example.com/api/v3/repos/octo/repo/commits/abc123/pulls"
        );
    }

    #[test]
    fn test_debug_hides_token() {
        let client =
            GitHubClient::new(DEFAULT_API_BASE, "octo/repo", Some("secret".to_string())).unwrap();
        let debug = format!("{:?}", client);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("has_token: true"));
    }

    #[test]
    fn test_pick_pull_request() {
        let pulls: Vec<PullSummary> = serde_json::from_str(
            r#"[{"number": 3, "merged_at": null}, {"number": 8, "merged_at": "2024-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(pick_pull_request(&pulls), Some(8));

        let open: Vec<PullSummary> = serde_json::from_str(r#"[{"number": 5}]"#).unwrap();
        assert_eq!(pick_pull_request(&open), Some(5));

        assert_eq!(pick_pull_request(&[]), None);
    }
}

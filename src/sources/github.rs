//! GitHub Releases API version source

use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::config::{DEFAULT_GITHUB_BASE_URL, FETCH_TIMEOUT_MS};
use crate::monitor::error::SourceError;
use crate::monitor::source::VersionSource;
use crate::monitor::types::SourceSpec;

/// Response from GitHub latest release API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Source returning the tag of the latest release of the `repo` parameter
pub struct GitHubSource {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubSource {
    pub const TYPE: &'static str = "github";

    /// Creates a new GitHubSource with a custom base URL
    pub fn new(base_url: &str, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("version-monitor")
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

impl Default for GitHubSource {
    fn default() -> Self {
        Self::new(DEFAULT_GITHUB_BASE_URL, None)
    }
}

#[async_trait::async_trait]
impl VersionSource for GitHubSource {
    async fn fetch(&self, spec: &SourceSpec) -> Result<String, SourceError> {
        let repo = spec.param("repo").ok_or(SourceError::MissingParam("repo"))?;
        let url = format!("{}/repos/{}/releases/latest", self.base_url, repo);

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(repo.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(SourceError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let release: Release = response.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        Ok(release.tag_name)
    }
}

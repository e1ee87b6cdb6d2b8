//! Plain HTTP version source

use std::time::Duration;

use tracing::warn;

use crate::config::FETCH_TIMEOUT_MS;
use crate::monitor::error::SourceError;
use crate::monitor::source::VersionSource;
use crate::monitor::types::SourceSpec;
use crate::sources::extract_version;

/// Source reading the version from the body of `GET url`
///
/// Parameters: `url`, optional `pattern` (see [`extract_version`]).
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub const TYPE: &'static str = "http";
}

impl Default for HttpSource {
    fn default() -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("version-monitor")
                .timeout(Duration::from_millis(FETCH_TIMEOUT_MS))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }
}

#[async_trait::async_trait]
impl VersionSource for HttpSource {
    async fn fetch(&self, spec: &SourceSpec) -> Result<String, SourceError> {
        let url = spec.param("url").ok_or(SourceError::MissingParam("url"))?;

        let response = self.client.get(url).send().await?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url.to_string()));
        }

        if !status.is_success() {
            warn!("HTTP source returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        let body = response.text().await?;

        extract_version(&body, spec.param("pattern"))
    }
}

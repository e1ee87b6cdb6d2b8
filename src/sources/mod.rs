//! Built-in version sources
//!
//! - [`static_version`]: Version written directly in the config (`static`)
//! - [`github`]: Latest GitHub release tag (`github`)
//! - [`http`]: Version read from an HTTP endpoint (`http`)
//! - [`command`]: Version printed by a local command (`command`)

pub mod command;
pub mod github;
pub mod http;
pub mod static_version;

use std::sync::Arc;

use regex::Regex;

pub use command::CommandSource;
pub use github::GitHubSource;
pub use http::HttpSource;
pub use static_version::StaticSource;

use crate::config::GitHubConfig;
use crate::monitor::error::{ConfigurationError, SourceError};
use crate::monitor::registry::SourceRegistry;

/// Build a registry containing every built-in source under its type name
pub fn default_registry(github: &GitHubConfig) -> Result<SourceRegistry, ConfigurationError> {
    let mut registry = SourceRegistry::new();
    registry.register(StaticSource::TYPE, Arc::new(StaticSource))?;
    registry.register(
        GitHubSource::TYPE,
        Arc::new(GitHubSource::new(&github.base_url, github.token.clone())),
    )?;
    registry.register(HttpSource::TYPE, Arc::new(HttpSource::default()))?;
    registry.register(CommandSource::TYPE, Arc::new(CommandSource))?;
    Ok(registry)
}

/// Extract a version from raw source output
///
/// Without a pattern the trimmed text is the version. With a pattern the
/// first capture group is used, or the whole match if the pattern has no group.
pub(crate) fn extract_version(text: &str, pattern: Option<&str>) -> Result<String, SourceError> {
    let version = match pattern {
        None => text.trim().to_string(),
        Some(pattern) => {
            let re = Regex::new(pattern).map_err(|e| SourceError::InvalidParam {
                name: "pattern",
                reason: e.to_string(),
            })?;
            let captures = re
                .captures(text)
                .ok_or_else(|| SourceError::NoMatch(pattern.to_string()))?;
            captures
                .get(1)
                .or_else(|| captures.get(0))
                .map(|m| m.as_str().trim().to_string())
                .unwrap_or_default()
        }
    };

    if version.is_empty() {
        return Err(SourceError::InvalidResponse("empty version".to_string()));
    }

    Ok(version)
}

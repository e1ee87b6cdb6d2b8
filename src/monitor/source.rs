//! Version source trait for resolving a source spec to a version string

#[cfg(test)]
use mockall::automock;

use crate::monitor::error::SourceError;
use crate::monitor::types::SourceSpec;

/// Trait for fetching a single version string
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Fetches the version identified by `spec`
    ///
    /// # Arguments
    /// * `spec` - The source spec; `spec.params` carries source-specific arguments
    ///
    /// # Returns
    /// * `Ok(String)` - The version as reported by the source, uninterpreted
    /// * `Err(SourceError)` - If the fetch fails
    async fn fetch(&self, spec: &SourceSpec) -> Result<String, SourceError>;
}

use thiserror::Error;

use crate::monitor::types::Role;

/// Errors that prevent the monitor from starting
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("target.{role}.type {source_type} of target {target} not found")]
    UnknownSourceType {
        target: String,
        role: Role,
        source_type: String,
    },

    #[error("source type {0} registered more than once")]
    DuplicateSourceType(String),

    #[error("target {0} defined more than once")]
    DuplicateTarget(String),
}

/// Errors returned by a single version source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Missing parameter: {0}")]
    MissingParam(&'static str),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Pattern {0} did not match")]
    NoMatch(String),

    #[error("No source registered for type {0}")]
    Unregistered(String),
}

/// A failed fetch of one side of one target
#[derive(Debug, Error)]
#[error("failed to load version of target {target} from {role} source {source_type}: {source}")]
pub struct FetchError {
    pub target: String,
    pub role: Role,
    pub source_type: String,
    #[source]
    pub source: SourceError,
}

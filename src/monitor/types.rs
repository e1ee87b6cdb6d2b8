//! Common types shared by the monitor components

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Identifies which version source to use and its arguments
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceSpec {
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub params: IndexMap<String, String>,
}

impl SourceSpec {
    pub fn new(source_type: &str) -> Self {
        Self {
            source_type: source_type.to_string(),
            params: IndexMap::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: &str) -> Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    /// Returns the value of a parameter, if present
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// A named subject being monitored
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Target {
    pub name: String,
    pub current: SourceSpec,
    pub latest: SourceSpec,
}

/// Which side of a target a source spec belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Current,
    Latest,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Current => "current",
            Role::Latest => "latest",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of resolving both source specs of one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Version {
    pub name: String,
    pub current: String,
    pub latest: String,
}

/// Copy of the cached versions handed out to readers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Cached versions in no particular order
    pub versions: Vec<Version>,
    /// Start time of the most recent fetch cycle, `None` before the first one
    pub fetched_at: Option<DateTime<Utc>>,
}

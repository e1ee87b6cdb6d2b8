use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};

use crate::monitor::error::FetchError;
use crate::monitor::types::{Snapshot, Version};

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, Version>,
    last_error: Option<Arc<FetchError>>,
    last_batch: Option<DateTime<Utc>>,
}

/// In-memory store for the results of fetch cycles
///
/// Every write touches a single field under the lock, so readers can observe
/// entries from different cycles side by side, but never a half-written entry.
#[derive(Default)]
pub struct ResultCache {
    state: RwLock<CacheState>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave a field half-written, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the entry for `version.name` as a whole
    pub fn store_version(&self, version: Version) {
        self.write().entries.insert(version.name.clone(), version);
    }

    /// Records `err` as the most recent error; it stays until another error replaces it
    pub fn record_error(&self, err: FetchError) {
        self.write().last_error = Some(Arc::new(err));
    }

    /// Records the start time of a fetch cycle
    pub fn mark_batch(&self, started_at: DateTime<Utc>) {
        self.write().last_batch = Some(started_at);
    }

    /// Returns a copy of all cached versions, or the last recorded error
    pub fn snapshot(&self) -> Result<Snapshot, Arc<FetchError>> {
        let state = self.read();

        if let Some(err) = &state.last_error {
            return Err(err.clone());
        }

        Ok(Snapshot {
            versions: state.entries.values().cloned().collect(),
            fetched_at: state.last_batch,
        })
    }

    /// Returns the cached entry for a single target, ignoring any recorded error
    pub fn get(&self, name: &str) -> Option<Version> {
        self.read().entries.get(name).cloned()
    }
}

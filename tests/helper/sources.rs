//! Stub version sources for testing

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use version_monitor::monitor::{SourceError, SourceRegistry, SourceSpec, Target, VersionSource};

/// Source returning a fixed version and counting its calls
pub struct FixedSource {
    version: String,
    calls: AtomicUsize,
}

impl FixedSource {
    pub fn new(version: &str) -> Arc<Self> {
        Arc::new(Self {
            version: version.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionSource for FixedSource {
    async fn fetch(&self, _spec: &SourceSpec) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.version.clone())
    }
}

/// Source that always fails and counts its calls
pub struct FailingSource {
    message: String,
    calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(message: &str) -> Arc<Self> {
        Arc::new(Self {
            message: message.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VersionSource for FailingSource {
    async fn fetch(&self, _spec: &SourceSpec) -> Result<String, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(SourceError::InvalidResponse(self.message.clone()))
    }
}

/// Source that fails its first `failures` calls and then returns `version`
pub struct FlakySource {
    version: String,
    failures: usize,
    calls: AtomicUsize,
}

impl FlakySource {
    pub fn new(version: &str, failures: usize) -> Arc<Self> {
        Arc::new(Self {
            version: version.to_string(),
            failures,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl VersionSource for FlakySource {
    async fn fetch(&self, _spec: &SourceSpec) -> Result<String, SourceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(SourceError::InvalidResponse(format!("flaky call {}", call)));
        }
        Ok(self.version.clone())
    }
}

/// Builder for a registry of stub sources
pub struct RegistryBuilder {
    registry: SourceRegistry,
}

impl RegistryBuilder {
    pub fn with(mut self, source_type: &str, source: Arc<dyn VersionSource>) -> Self {
        self.registry.register(source_type, source).unwrap();
        self
    }

    pub fn build(self) -> SourceRegistry {
        self.registry
    }
}

pub fn registry() -> RegistryBuilder {
    RegistryBuilder {
        registry: SourceRegistry::new(),
    }
}

/// Create a target whose sides use the given source types
pub fn target(name: &str, current_type: &str, latest_type: &str) -> Target {
    Target {
        name: name.to_string(),
        current: SourceSpec::new(current_type),
        latest: SourceSpec::new(latest_type),
    }
}

//! Registry of version sources keyed by source type name

use std::collections::HashMap;
use std::sync::Arc;

use crate::monitor::error::ConfigurationError;
use crate::monitor::source::VersionSource;

/// Maps source type names to the sources that serve them
///
/// Populated once at startup and shared read-only afterwards.
#[derive(Default, Clone)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn VersionSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under `source_type`
    ///
    /// Registering the same type name twice is rejected.
    pub fn register(
        &mut self,
        source_type: &str,
        source: Arc<dyn VersionSource>,
    ) -> Result<(), ConfigurationError> {
        if self.sources.contains_key(source_type) {
            return Err(ConfigurationError::DuplicateSourceType(
                source_type.to_string(),
            ));
        }
        self.sources.insert(source_type.to_string(), source);
        Ok(())
    }

    pub fn lookup(&self, source_type: &str) -> Option<Arc<dyn VersionSource>> {
        self.sources.get(source_type).cloned()
    }

    pub fn contains(&self, source_type: &str) -> bool {
        self.sources.contains_key(source_type)
    }

    /// Returns the registered type names in sorted order
    pub fn types(&self) -> Vec<&str> {
        let mut types: Vec<_> = self.sources.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monitor::source::MockVersionSource;

    #[test]
    fn lookup_returns_registered_source() {
        let mut registry = SourceRegistry::new();
        registry
            .register("static", Arc::new(MockVersionSource::new()))
            .unwrap();

        assert!(registry.lookup("static").is_some());
        assert!(registry.lookup("github").is_none());
    }

    #[test]
    fn register_rejects_duplicate_type() {
        let mut registry = SourceRegistry::new();
        registry
            .register("static", Arc::new(MockVersionSource::new()))
            .unwrap();

        let result = registry.register("static", Arc::new(MockVersionSource::new()));

        assert_eq!(
            result,
            Err(ConfigurationError::DuplicateSourceType("static".to_string()))
        );
    }

    #[test]
    fn types_are_sorted() {
        let mut registry = SourceRegistry::new();
        for source_type in ["github", "command", "static"] {
            registry
                .register(source_type, Arc::new(MockVersionSource::new()))
                .unwrap();
        }

        assert_eq!(registry.types(), vec!["command", "github", "static"]);
    }
}

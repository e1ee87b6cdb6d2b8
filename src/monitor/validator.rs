//! Startup validation of the target list against the source registry

use std::collections::HashSet;

use crate::monitor::error::ConfigurationError;
use crate::monitor::registry::SourceRegistry;
use crate::monitor::types::{Role, Target};

/// Checks that every target is unique and references registered source types
///
/// Targets are checked in list order and the first problem is returned.
pub fn validate(targets: &[Target], registry: &SourceRegistry) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();

    for target in targets {
        if !seen.insert(target.name.as_str()) {
            return Err(ConfigurationError::DuplicateTarget(target.name.clone()));
        }

        for (role, spec) in [(Role::Latest, &target.latest), (Role::Current, &target.current)] {
            if !registry.contains(&spec.source_type) {
                return Err(ConfigurationError::UnknownSourceType {
                    target: target.name.clone(),
                    role,
                    source_type: spec.source_type.clone(),
                });
            }
        }
    }

    Ok(())
}

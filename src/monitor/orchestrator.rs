//! One fetch cycle over all targets

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info};

use crate::monitor::cache::ResultCache;
use crate::monitor::error::{FetchError, SourceError};
use crate::monitor::metrics::FetchMetrics;
use crate::monitor::registry::SourceRegistry;
use crate::monitor::types::{Role, SourceSpec, Target, Version};

/// Fetch one side of a target
async fn fetch_role(
    registry: &SourceRegistry,
    target: &Target,
    role: Role,
    spec: &SourceSpec,
) -> Result<String, FetchError> {
    let wrap = |source: SourceError| FetchError {
        target: target.name.clone(),
        role,
        source_type: spec.source_type.clone(),
        source,
    };

    let source = registry
        .lookup(&spec.source_type)
        .ok_or_else(|| wrap(SourceError::Unregistered(spec.source_type.clone())))?;

    source.fetch(spec).await.map_err(wrap)
}

/// Fetch both sides of a target, current first
///
/// The latest source is not called when the current source fails.
async fn fetch_target(registry: &SourceRegistry, target: &Target) -> Result<Version, FetchError> {
    debug!("Fetching version {}", target.name);

    let current = fetch_role(registry, target, Role::Current, &target.current).await?;
    let latest = fetch_role(registry, target, Role::Latest, &target.latest).await?;

    Ok(Version {
        name: target.name.clone(),
        current,
        latest,
    })
}

/// Run one fetch cycle over `targets`
///
/// Each target is fetched in its own concurrent task and its outcome written
/// to `cache`: the complete `Version` on success, the error otherwise. A
/// failing target never stops the others. `max_concurrency` bounds the number
/// of targets in flight; `None` fetches all targets at once. When `metrics`
/// is given, the cycle and every failure are counted there.
///
/// Returns after every target task has finished.
pub async fn run_cycle(
    targets: &[Target],
    registry: &SourceRegistry,
    cache: &ResultCache,
    max_concurrency: Option<usize>,
    metrics: Option<&FetchMetrics>,
) {
    info!("Start fetching versions for {} targets", targets.len());
    cache.mark_batch(Utc::now());
    if let Some(metrics) = metrics {
        metrics.record_cycle();
    }

    stream::iter(targets)
        .for_each_concurrent(max_concurrency, |target| async move {
            match fetch_target(registry, target).await {
                Ok(version) => {
                    debug!(
                        "Fetched version {}: current={} latest={}",
                        version.name, version.current, version.latest
                    );
                    cache.store_version(version);
                }
                Err(e) => {
                    error!("{}", e);
                    if let Some(metrics) = metrics {
                        metrics.record_failure(e.role);
                    }
                    cache.record_error(e);
                }
            }
        })
        .await;

    info!("Done fetching versions");
}

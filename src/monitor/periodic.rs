//! Periodic monitor: validation, scheduling and the read interface

use std::sync::Arc;

#[cfg(test)]
use mockall::automock;
use tracing::info;

use crate::monitor::cache::ResultCache;
use crate::monitor::error::{ConfigurationError, FetchError};
use crate::monitor::metrics::FetchMetrics;
use crate::monitor::orchestrator::run_cycle;
use crate::monitor::registry::SourceRegistry;
use crate::monitor::scheduler::{Scheduler, SchedulerHandle, Ticker};
use crate::monitor::types::{Snapshot, Target};
use crate::monitor::validator::validate;

/// Read access to the most recent fetch results
#[cfg_attr(test, automock)]
pub trait Monitor: Send + Sync {
    /// Returns the cached versions, or the last recorded fetch error
    ///
    /// While an error is recorded no versions are returned, even for targets
    /// that were fetched successfully.
    fn versions(&self) -> Result<Snapshot, Arc<FetchError>>;
}

/// Monitor that refreshes all targets on a schedule
#[derive(Clone)]
pub struct PeriodicMonitor {
    targets: Arc<[Target]>,
    registry: Arc<SourceRegistry>,
    cache: Arc<ResultCache>,
    max_concurrency: Option<usize>,
    metrics: Option<Arc<FetchMetrics>>,
}

impl PeriodicMonitor {
    pub fn new(targets: Vec<Target>, registry: SourceRegistry) -> Self {
        Self {
            targets: targets.into(),
            registry: Arc::new(registry),
            cache: Arc::new(ResultCache::new()),
            max_concurrency: None,
            metrics: None,
        }
    }

    /// Limit the number of targets fetched at the same time
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit;
        self
    }

    /// Count cycles and fetch failures in `metrics`
    pub fn with_metrics(mut self, metrics: Arc<FetchMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    pub fn registry(&self) -> &SourceRegistry {
        &self.registry
    }

    /// Checks the targets against the registry without starting anything
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        validate(&self.targets, &self.registry)
    }

    /// Validate the configuration and start periodic fetching
    ///
    /// The first cycle runs immediately, later ones on every tick of `ticker`.
    /// Nothing is fetched when validation fails.
    pub fn start<T: Ticker>(&self, ticker: T) -> Result<SchedulerHandle, ConfigurationError> {
        self.validate()?;

        info!(
            "Starting monitor for {} targets with sources {:?}",
            self.targets.len(),
            self.registry.types()
        );

        let monitor = self.clone();
        Ok(Scheduler::new(ticker).start(move || {
            let monitor = monitor.clone();
            async move { monitor.run_cycle().await }
        }))
    }

    /// Run one fetch cycle over all targets and wait for it to finish
    pub async fn run_cycle(&self) {
        run_cycle(
            &self.targets,
            &self.registry,
            &self.cache,
            self.max_concurrency,
            self.metrics.as_deref(),
        )
        .await;
    }
}

impl Monitor for PeriodicMonitor {
    fn versions(&self) -> Result<Snapshot, Arc<FetchError>> {
        self.cache.snapshot()
    }
}

//! Prometheus counters for fetch cycles

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::monitor::types::Role;

/// Counters updated by the orchestrator, exposed in the Prometheus text format
pub struct FetchMetrics {
    registry: Registry,
    cycles: IntCounter,
    failures: IntCounterVec,
}

impl FetchMetrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let cycles = IntCounter::new(
            "version_monitor_fetch_cycles_total",
            "Number of fetch cycles started",
        )?;
        let failures = IntCounterVec::new(
            Opts::new(
                "version_monitor_fetch_failures_total",
                "Number of failed version fetches",
            ),
            &["role"],
        )?;

        registry.register(Box::new(cycles.clone()))?;
        registry.register(Box::new(failures.clone()))?;

        // Export both roles at zero before the first failure
        for role in [Role::Current, Role::Latest] {
            failures.with_label_values(&[role.as_str()]);
        }

        Ok(Self {
            registry,
            cycles,
            failures,
        })
    }

    pub fn record_cycle(&self) {
        self.cycles.inc();
    }

    pub fn record_failure(&self, role: Role) {
        self.failures.with_label_values(&[role.as_str()]).inc();
    }

    pub fn cycles(&self) -> u64 {
        self.cycles.get()
    }

    pub fn failures(&self, role: Role) -> u64 {
        self.failures.with_label_values(&[role.as_str()]).get()
    }

    /// Encode all counters in the Prometheus text exposition format
    pub fn encode(&self) -> prometheus::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

//! Version monitoring core
//!
//! This module periodically fetches a "current" and a "latest" version for each
//! configured target through pluggable version sources and keeps the most recent
//! results in memory.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  Scheduler  │────▶│ Orchestrator │────▶│    Cache    │
//! │   (ticks)   │     │ (fan-out)    │     │  (results)  │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!                            │                    ▲
//!                            ▼                    │
//!                     ┌──────────────┐     ┌─────────────┐
//!                     │   Registry   │     │   Monitor   │
//!                     │  (sources)   │     │   (read)    │
//!                     └──────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cache`]: Lock-protected store of versions, last error and batch time
//! - [`error`]: Configuration, source and fetch errors
//! - [`metrics`]: Prometheus counters for cycles and failed fetches
//! - [`orchestrator`]: Runs one fetch cycle over all targets concurrently
//! - [`periodic`]: `Monitor` trait and the scheduled `PeriodicMonitor`
//! - [`registry`]: Maps source type names to `VersionSource` implementations
//! - [`scheduler`]: Immediate plus recurring cycle trigger with explicit stop
//! - [`source`]: `VersionSource` trait implemented by concrete sources
//! - [`types`]: `Target`, `SourceSpec`, `Version` and `Snapshot`
//! - [`validator`]: Startup check of targets against the registry

pub mod cache;
pub mod error;
pub mod metrics;
pub mod orchestrator;
pub mod periodic;
pub mod registry;
pub mod scheduler;
pub mod source;
pub mod types;
pub mod validator;

pub use error::{ConfigurationError, FetchError, SourceError};
pub use metrics::FetchMetrics;
pub use periodic::{Monitor, PeriodicMonitor};
pub use registry::SourceRegistry;
pub use scheduler::{ChannelTicker, IntervalTicker, Scheduler, SchedulerHandle, Ticker};
pub use source::VersionSource;
pub use types::{Role, Snapshot, SourceSpec, Target, Version};

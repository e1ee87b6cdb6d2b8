use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use version_monitor::config::{DEFAULT_LISTEN, MonitorConfig, default_config_path};
use version_monitor::monitor::{FetchMetrics, IntervalTicker, Monitor, PeriodicMonitor};
use version_monitor::{logging, server, sources};

#[derive(Parser)]
#[command(name = "version-monitor")]
#[command(version, about = "Monitors drift between deployed and upstream versions")]
struct Cli {
    /// Path to the JSON target configuration
    #[arg(long, short, env = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short, env = "VERBOSE", global = true)]
    verbose: bool,

    /// Address the HTTP server listens on
    #[arg(long, env = "LISTEN", default_value = DEFAULT_LISTEN, global = true)]
    listen: SocketAddr,

    /// Write logs to this file instead of stderr
    #[arg(long, env = "LOG_FILE", global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch versions periodically and serve them over HTTP (default)
    Serve,
    /// Fetch versions once and print them as JSON
    Check,
    /// Validate the configuration without fetching anything
    Validate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = MonitorConfig::load(&config_path)?;
    info!(
        "Loaded {} targets from {:?}",
        config.targets.len(),
        config_path
    );

    let registry = sources::default_registry(&config.github)?;
    let refresh_interval = config.refresh_interval();
    let metrics = Arc::new(FetchMetrics::new()?);
    let monitor = PeriodicMonitor::new(config.targets, registry)
        .with_max_concurrency(config.max_concurrency)
        .with_metrics(metrics.clone());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    match cli.command {
        None | Some(Command::Serve) => {
            runtime.block_on(serve(monitor, metrics, refresh_interval, cli.listen))
        }
        Some(Command::Check) => runtime.block_on(check(monitor)),
        Some(Command::Validate) => {
            monitor.validate()?;
            println!(
                "{} targets valid, sources: {}",
                monitor.targets().len(),
                monitor.registry().types().join(", ")
            );
            Ok(())
        }
    }
}

async fn serve(
    monitor: PeriodicMonitor,
    metrics: Arc<FetchMetrics>,
    refresh_interval: std::time::Duration,
    listen: SocketAddr,
) -> anyhow::Result<()> {
    let scheduler = monitor.start(IntervalTicker::new(refresh_interval))?;

    let shutdown = server::shutdown_on(tokio::signal::ctrl_c());
    let result = server::serve(listen, Arc::new(monitor), metrics, shutdown).await;

    scheduler.stop().await;
    result.context("HTTP server failed")
}

async fn check(monitor: PeriodicMonitor) -> anyhow::Result<()> {
    monitor.validate()?;
    monitor.run_cycle().await;

    let snapshot = monitor
        .versions()
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

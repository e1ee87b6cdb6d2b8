//! Process-wide structured logging

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{Builder, Rotation};
use tracing_subscriber::EnvFilter;

fn default_directive(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install a JSON formatted subscriber
///
/// `RUST_LOG` takes precedence over `verbose`. Logs go to `log_file` when
/// given, otherwise to stderr. The returned guard flushes pending lines on
/// drop and must be kept alive for the lifetime of the process.
pub fn init(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let (writer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .and_then(|name| name.to_str())
                .context("log file path has no file name")?;
            let appender = Builder::new()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name)
                .build(dir)
                .with_context(|| format!("failed to open log file {:?}", path))?;
            tracing_appender::non_blocking(appender)
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))?;

    Ok(guard)
}

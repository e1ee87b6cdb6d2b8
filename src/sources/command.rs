//! Local command version source

use tokio::process::Command;
use tracing::debug;

use crate::monitor::error::SourceError;
use crate::monitor::source::VersionSource;
use crate::monitor::types::SourceSpec;
use crate::sources::extract_version;

/// Source reading the version from the standard output of a command
///
/// Parameters: `command`, optional `args` (split on whitespace), optional
/// `pattern` (see [`extract_version`]).
pub struct CommandSource;

impl CommandSource {
    pub const TYPE: &'static str = "command";
}

#[async_trait::async_trait]
impl VersionSource for CommandSource {
    async fn fetch(&self, spec: &SourceSpec) -> Result<String, SourceError> {
        let program = spec
            .param("command")
            .ok_or(SourceError::MissingParam("command"))?;
        let args: Vec<&str> = spec
            .param("args")
            .map(|args| args.split_whitespace().collect())
            .unwrap_or_default();

        debug!("Running {} {:?}", program, args);

        let output = Command::new(program)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| SourceError::CommandFailed(format!("{}: {}", program, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SourceError::CommandFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        extract_version(&stdout, spec.param("pattern"))
    }
}

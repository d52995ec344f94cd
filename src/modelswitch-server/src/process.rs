//! Stopping and starting model processes.

use std::io;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::config::ServerConfig;

/// Operating system process control used by the switcher.
#[async_trait]
pub trait ProcessControl: Send + Sync + std::fmt::Debug {
    /// Stop processes whose command line matches `pattern`.
    ///
    /// Finding nothing to stop is not an error.
    async fn terminate(&self, pattern: &str) -> io::Result<()>;

    /// Start `model` in the background with its output discarded.
    ///
    /// Returns once the process is spawned; it is not waited on.
    async fn launch(&self, model: &str) -> io::Result<()>;
}

/// [`ProcessControl`] backed by external commands.
///
/// Defaults are `pkill -f <pattern>` and `ollama run <model>`.
#[derive(Debug, Clone)]
pub struct SystemProcessControl {
    terminate_command: Vec<String>,
    launch_command: Vec<String>,
}

impl SystemProcessControl {
    pub fn new(terminate_command: Vec<String>, launch_command: Vec<String>) -> Self {
        Self {
            terminate_command,
            launch_command,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self::new(
            config.terminate_command.clone(),
            config.launch_command.clone(),
        )
    }
}

impl Default for SystemProcessControl {
    fn default() -> Self {
        Self::from_config(&ServerConfig::default())
    }
}

#[async_trait]
impl ProcessControl for SystemProcessControl {
    async fn terminate(&self, pattern: &str) -> io::Result<()> {
        let status = build_command(&self.terminate_command, pattern)?
            .status()
            .await?;

        // pkill exits 1 when nothing matched
        debug!(pattern, status = %status, "Terminate command finished");
        Ok(())
    }

    async fn launch(&self, model: &str) -> io::Result<()> {
        let child = build_command(&self.launch_command, model)?.spawn()?;

        info!(model, pid = ?child.id(), "Launched model process");
        Ok(())
    }
}

/// Build `command` with `target` appended and all stdio detached.
fn build_command(command: &[String], target: &str) -> io::Result<Command> {
    let (program, args) = command.split_first().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, "empty process command")
    })?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .arg(target)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|p| p.to_string()).collect()
    }

    #[test]
    fn test_build_command_appends_target() {
        let cmd = build_command(&command(&["ollama", "run"]), "llama3").unwrap();
        let std_cmd = cmd.as_std();
        assert_eq!(std_cmd.get_program(), "ollama");
        let args: Vec<_> = std_cmd.get_args().collect();
        assert_eq!(args, vec!["run", "llama3"]);
    }

    #[test]
    fn test_build_command_rejects_empty() {
        let err = build_command(&[], "llama3").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_terminate_ignores_exit_status() {
        let control = SystemProcessControl::new(command(&["false"]), command(&["true"]));
        assert!(control.terminate("nothing-matches").await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_launch_spawns_process() {
        let control = SystemProcessControl::new(command(&["true"]), command(&["true"]));
        assert!(control.launch("llama3").await.is_ok());
    }

    #[tokio::test]
    async fn test_launch_missing_binary_fails() {
        let control = SystemProcessControl::new(
            command(&["true"]),
            command(&["modelswitch-no-such-launcher"]),
        );
        let err = control.launch("llama3").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}

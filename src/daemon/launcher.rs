//! Daemon process launch.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::{Child, Command};

/// Errors raised while starting the daemon.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to start {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} exited before reporting a pid", program.display())]
    NoPid { program: PathBuf },
}

/// A started daemon process.
#[derive(Debug)]
pub struct ProcessHandle {
    pid: u32,
    child: Child,
}

impl ProcessHandle {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Wait for the process to exit.
    pub async fn wait(mut self) -> std::io::Result<ExitStatus> {
        self.child.wait().await
    }
}

/// Capability to start the daemon. The update cycle does not depend on it.
pub trait ProcessLauncher {
    fn launch(&self) -> Result<ProcessHandle, LaunchError>;
}

/// Starts a fixed executable with inherited stdout/stderr, without waiting.
pub struct CommandLauncher {
    program: PathBuf,
}

impl CommandLauncher {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl ProcessLauncher for CommandLauncher {
    fn launch(&self) -> Result<ProcessHandle, LaunchError> {
        tracing::info!(program = %self.program.display(), "Starting daemon");

        let child = Command::new(&self.program)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| LaunchError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let pid = child.id().ok_or_else(|| LaunchError::NoPid {
            program: self.program.clone(),
        })?;

        tracing::info!(pid, "Daemon started");
        Ok(ProcessHandle { pid, child })
    }
}

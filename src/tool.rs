//! Invocation of the external analysis tool

use crate::error::OverlayError;
use crate::process::{run_to_completion, ChildOutcome, Interrupt, ToolCommand};
use std::fmt;
use std::path::Path;
use std::process::ExitStatus;
use tracing::info;

/// ESLint release the overlay templates are written for
pub const ESLINT_SPECIFIER: &str = "npm:eslint@9.21.0";

/// Exit code reported when the user interrupted the run
pub const EXIT_INTERRUPTED: i32 = 130;

/// Lint command run through Deno: env and sys access, read/write limited to
/// the project directory, no network.
pub fn eslint_command(deno: &str) -> ToolCommand {
    ToolCommand::new(deno, ["run", "-ES", "-RW=.", ESLINT_SPECIFIER])
}

/// How the analysis tool terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolStatus {
    /// Exited on its own with this code
    Exited(i32),
    /// Killed by this signal number
    Signaled(i32),
    /// Stopped because this process was interrupted
    Interrupted,
}

impl ToolStatus {
    pub fn from_exit_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ToolStatus::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ToolStatus::Signaled(signal);
            }
        }

        ToolStatus::Exited(1)
    }

    pub fn success(&self) -> bool {
        matches!(self, ToolStatus::Exited(0))
    }

    /// Exit code this process should finish with
    pub fn exit_code(&self) -> i32 {
        match self {
            ToolStatus::Exited(code) => *code,
            ToolStatus::Signaled(signal) => 128 + signal,
            ToolStatus::Interrupted => EXIT_INTERRUPTED,
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolStatus::Exited(code) => write!(f, "exited with code {}", code),
            ToolStatus::Signaled(signal) => write!(f, "killed by signal {}", signal),
            ToolStatus::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Runs the analysis tool as a pass-through child process.
///
/// Output is not captured or interpreted.
pub struct ToolInvoker {
    command: ToolCommand,
}

impl ToolInvoker {
    pub fn new(command: ToolCommand) -> Self {
        Self { command }
    }

    pub fn eslint(deno: &str) -> Self {
        Self::new(eslint_command(deno))
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    pub async fn invoke(
        &self,
        root: &Path,
        interrupt: &Interrupt,
    ) -> Result<ToolStatus, OverlayError> {
        info!(command = %self.command, "Running analysis");

        let status = match run_to_completion(&self.command, root, interrupt).await? {
            ChildOutcome::Exited(status) => ToolStatus::from_exit_status(status),
            ChildOutcome::Interrupted => ToolStatus::Interrupted,
        };

        info!(%status, "Analysis finished");
        Ok(status)
    }
}

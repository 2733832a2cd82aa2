//! Child process execution with interruption support
//!
//! Every external program runs through [`run_to_completion`], which awaits
//! termination before returning. Nothing is spawned and left running: if the
//! [`Interrupt`] fires the child is killed and reaped first.

use crate::error::OverlayError;
use std::fmt;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// An external program with a fixed argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolCommand {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// How a child process ended
#[derive(Debug)]
pub enum ChildOutcome {
    Exited(ExitStatus),
    Interrupted,
}

/// Notification that the user asked this process to stop
#[derive(Debug, Clone)]
pub struct Interrupt {
    rx: watch::Receiver<bool>,
}

/// Trigger side of a manually driven [`Interrupt`]
#[derive(Debug)]
pub struct InterruptHandle {
    tx: watch::Sender<bool>,
}

impl InterruptHandle {
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl Interrupt {
    /// Fire on Ctrl-C, and on SIGTERM on Unix. Must be called inside a Tokio runtime.
    ///
    /// The signal handlers are registered before this returns, so a signal
    /// delivered at any later point is observed rather than terminating the
    /// process.
    pub fn listen() -> Self {
        let (handle, interrupt) = Self::manual();
        let mut signals = SignalListener::install();
        tokio::spawn(async move {
            signals.recv().await;
            info!("Received interrupt signal");
            handle.trigger();
        });
        interrupt
    }

    /// An interrupt that only fires when the returned handle is triggered
    pub fn manual() -> (InterruptHandle, Self) {
        let (tx, rx) = watch::channel(false);
        (InterruptHandle { tx }, Self { rx })
    }

    /// An interrupt that never fires
    pub fn never() -> Self {
        Self::manual().1
    }

    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the interrupt fires; pend forever if it never can
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|triggered| *triggered).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Registered process signal handlers. A handler that could not be installed
/// is logged and never fires.
#[cfg(unix)]
struct SignalListener {
    interrupt: Option<tokio::signal::unix::Signal>,
    terminate: Option<tokio::signal::unix::Signal>,
}

#[cfg(unix)]
impl SignalListener {
    fn install() -> Self {
        use tokio::signal::unix::{signal, SignalKind};

        let install = |kind: SignalKind, name: &str| match signal(kind) {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!(error = %e, signal = name, "Could not install signal handler");
                None
            }
        };

        Self {
            interrupt: install(SignalKind::interrupt(), "SIGINT"),
            terminate: install(SignalKind::terminate(), "SIGTERM"),
        }
    }

    async fn recv(&mut self) {
        tokio::select! {
            _ = next(self.interrupt.as_mut()) => {}
            _ = next(self.terminate.as_mut()) => {}
        }
    }
}

#[cfg(unix)]
async fn next(stream: Option<&mut tokio::signal::unix::Signal>) {
    if let Some(stream) = stream {
        if stream.recv().await.is_some() {
            return;
        }
    }
    std::future::pending::<()>().await
}

#[cfg(windows)]
struct SignalListener {
    ctrl_c: Option<tokio::signal::windows::CtrlC>,
}

#[cfg(windows)]
impl SignalListener {
    fn install() -> Self {
        let ctrl_c = match tokio::signal::windows::ctrl_c() {
            Ok(stream) => Some(stream),
            Err(e) => {
                warn!(error = %e, "Could not install Ctrl-C handler");
                None
            }
        };
        Self { ctrl_c }
    }

    async fn recv(&mut self) {
        if let Some(stream) = self.ctrl_c.as_mut() {
            if stream.recv().await.is_some() {
                return;
            }
        }
        std::future::pending::<()>().await
    }
}

/// Run `command` in `cwd` with inherited stdio and wait for it to terminate.
///
/// Fails with [`OverlayError::ToolLaunch`] if the program cannot be spawned.
pub async fn run_to_completion(
    command: &ToolCommand,
    cwd: &Path,
    interrupt: &Interrupt,
) -> Result<ChildOutcome, OverlayError> {
    debug!(command = %command, cwd = %cwd.display(), "Spawning");

    let mut child = Command::new(&command.program)
        .args(&command.args)
        .current_dir(cwd)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| OverlayError::ToolLaunch {
            program: command.program.clone(),
            source,
        })?;

    debug!(pid = ?child.id(), program = %command.program, "Spawned");

    tokio::select! {
        status = child.wait() => {
            let status = status.map_err(|source| OverlayError::ToolWait {
                program: command.program.clone(),
                source,
            })?;
            debug!(program = %command.program, %status, "Exited");
            Ok(ChildOutcome::Exited(status))
        }
        _ = interrupt.triggered() => {
            warn!(program = %command.program, "Interrupted, stopping child process");
            if let Err(e) = child.kill().await {
                warn!(program = %command.program, error = %e, "Failed to stop child process");
            }
            Ok(ChildOutcome::Interrupted)
        }
    }
}

use crate::bootstrap::{BootstrapOutcome, DependencyBootstrap};
use crate::config::NofpConfig;
use crate::error::{OverlayError, EXIT_FAILURE};
use crate::fs::FileSystem;
use crate::overlay::{guard, materializer, CleanupReport, GuardOutcome, Overlay, OverlayFile};
use crate::process::Interrupt;
use crate::tool::{ToolInvoker, ToolStatus};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Materialize, bootstrap, lint, clean up
    Run,
    /// Materialize and bootstrap, then leave everything in place
    InstallOnly,
}

/// Checkpoints of a run, in order. Once `Materialized` is reached the run
/// always passes through `CleanedUp` unless it is `InstallOnly`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Guarded,
    Materialized,
    Bootstrapped,
    Invoked,
    CleanedUp,
}

impl fmt::Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Guarded => "guarded",
            RunPhase::Materialized => "materialized",
            RunPhase::Bootstrapped => "bootstrapped",
            RunPhase::Invoked => "invoked",
            RunPhase::CleanedUp => "cleaned-up",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub enum RunOutcome {
    /// A configuration file was already present; nothing was written
    AbortedByConflict(Vec<PathBuf>),
    /// Install-only mode finished and left the overlay in place
    Staged {
        files: Vec<PathBuf>,
        bootstrap: BootstrapOutcome,
    },
    /// The tool ran (or was interrupted) and the overlay was removed
    Completed {
        status: ToolStatus,
        bootstrap: BootstrapOutcome,
        cleanup: CleanupReport,
    },
}

impl RunOutcome {
    /// Cleanup results never influence this
    pub fn exit_code(&self) -> i32 {
        match self {
            RunOutcome::AbortedByConflict(_) => EXIT_FAILURE,
            RunOutcome::Staged { .. } => 0,
            RunOutcome::Completed { status, .. } => status.exit_code(),
        }
    }
}

/// Drives one overlay run against a project root
pub struct RunOrchestrator<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
    files: Vec<OverlayFile>,
    bootstrap: DependencyBootstrap,
    invoker: ToolInvoker,
    interrupt: Interrupt,
    trace: Mutex<Vec<RunPhase>>,
}

impl<'a> RunOrchestrator<'a> {
    /// Orchestrator with the bundled templates, `npm` and `deno` from `PATH`,
    /// and no interrupt source
    pub fn new(fs: &'a dyn FileSystem, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            files: OverlayFile::all(None),
            bootstrap: DependencyBootstrap::npm("npm"),
            invoker: ToolInvoker::eslint("deno"),
            interrupt: Interrupt::never(),
            trace: Mutex::new(Vec::new()),
        }
    }

    pub fn from_config(
        fs: &'a dyn FileSystem,
        root: impl Into<PathBuf>,
        config: &NofpConfig,
    ) -> Self {
        let bootstrap = if config.bootstrap {
            DependencyBootstrap::npm(&config.npm)
        } else {
            DependencyBootstrap::disabled()
        };

        Self::new(fs, root)
            .with_files(OverlayFile::all(config.template_dir.as_deref()))
            .with_bootstrap(bootstrap)
            .with_invoker(ToolInvoker::eslint(&config.deno))
    }

    pub fn with_files(mut self, files: Vec<OverlayFile>) -> Self {
        self.files = files;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: DependencyBootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn with_invoker(mut self, invoker: ToolInvoker) -> Self {
        self.invoker = invoker;
        self
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Phases reached by the most recent [`execute`](Self::execute), in order
    pub fn phases(&self) -> Vec<RunPhase> {
        self.trace
            .lock()
            .map(|trace| trace.clone())
            .unwrap_or_default()
    }

    /// Execute a run.
    ///
    /// Errors are returned only after everything written so far has been
    /// removed again.
    pub async fn execute(&self, mode: RunMode) -> Result<RunOutcome, OverlayError> {
        let start = Instant::now();
        info!(root = %self.root.display(), ?mode, "Starting overlay run");
        if let Ok(mut trace) = self.trace.lock() {
            trace.clear();
        }

        if let GuardOutcome::Conflict(paths) = guard::check(self.fs, &self.root, &self.files) {
            for path in &paths {
                debug!(path = %path.display(), "Configuration already exists");
            }
            return Ok(RunOutcome::AbortedByConflict(paths));
        }
        self.enter(RunPhase::Guarded);

        let mut overlay = Overlay::new(self.fs, &self.root);
        if let Err(e) = materializer::materialize(self.fs, &mut overlay, &self.files) {
            debug!(error = %e, "Could not materialize configuration");
            self.clean_up(overlay);
            return Err(e);
        }
        self.enter(RunPhase::Materialized);

        let report = self.bootstrap.run(self.fs, &self.root, &self.interrupt).await;
        if report.created_by_run {
            overlay.own_dependency_dir(report.dependency_dir.clone());
        }
        self.enter(RunPhase::Bootstrapped);

        let interrupted =
            report.outcome == BootstrapOutcome::Interrupted || self.interrupt.is_triggered();

        let status = if interrupted {
            ToolStatus::Interrupted
        } else if mode == RunMode::InstallOnly {
            let files = overlay.keep();
            info!(files = files.len(), "Overlay staged");
            return Ok(RunOutcome::Staged {
                files,
                bootstrap: report.outcome,
            });
        } else {
            match self.invoker.invoke(&self.root, &self.interrupt).await {
                Ok(status) => status,
                Err(e) => {
                    debug!(error = %e, "Could not run analysis");
                    self.clean_up(overlay);
                    return Err(e);
                }
            }
        };
        self.enter(RunPhase::Invoked);

        let cleanup = self.clean_up(overlay);

        info!(
            %status,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Overlay run complete"
        );

        Ok(RunOutcome::Completed {
            status,
            bootstrap: report.outcome,
            cleanup,
        })
    }

    fn clean_up(&self, overlay: Overlay<'_>) -> CleanupReport {
        let report = overlay.cleanup();
        debug!(
            removed = report.removed.len(),
            already_absent = report.already_absent.len(),
            failures = report.failures.len(),
            "Overlay removed"
        );
        self.enter(RunPhase::CleanedUp);
        report
    }

    fn enter(&self, phase: RunPhase) {
        debug!(%phase, "Phase reached");
        if let Ok(mut trace) = self.trace.lock() {
            trace.push(phase);
        }
    }
}

use crate::fs::FileSystem;
use crate::overlay::DEPENDENCY_DIR;
use crate::process::{run_to_completion, ChildOutcome, Interrupt, ToolCommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Type declarations the typed lint rules need to resolve runtime globals
pub const TYPES_PACKAGE: &str = "@types/node";

/// Install [`TYPES_PACKAGE`] into `node_modules` without touching
/// `package.json` or creating a lockfile.
pub fn install_command(npm: &str) -> ToolCommand {
    ToolCommand::new(
        npm,
        ["install", "--no-save", "--no-package-lock", TYPES_PACKAGE],
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// Bootstrapping is switched off
    Disabled,
    /// The dependency directory was already there; nothing was installed
    AlreadyPresent,
    Installed,
    /// The install ran but did not succeed, or could not be started
    Failed(String),
    /// The install was stopped by an interrupt
    Interrupted,
}

/// What a bootstrap attempt did, and whether the run now owns the directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapReport {
    pub outcome: BootstrapOutcome,
    pub dependency_dir: PathBuf,
    pub created_by_run: bool,
}

/// Installs the auxiliary type declarations when the project has no
/// dependency directory of its own.
pub struct DependencyBootstrap {
    command: ToolCommand,
    enabled: bool,
}

impl DependencyBootstrap {
    pub fn new(command: ToolCommand) -> Self {
        Self {
            command,
            enabled: true,
        }
    }

    pub fn npm(npm: &str) -> Self {
        Self::new(install_command(npm))
    }

    pub fn disabled() -> Self {
        Self {
            command: install_command("npm"),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn command(&self) -> &ToolCommand {
        &self.command
    }

    /// Never fails: install problems are reported in the outcome and the run
    /// carries on with degraded type information.
    pub async fn run(
        &self,
        fs: &dyn FileSystem,
        root: &Path,
        interrupt: &Interrupt,
    ) -> BootstrapReport {
        let dependency_dir = root.join(DEPENDENCY_DIR);
        let report = |outcome, created_by_run| BootstrapReport {
            outcome,
            dependency_dir: dependency_dir.clone(),
            created_by_run,
        };

        if !self.enabled {
            debug!("Dependency bootstrap disabled");
            return report(BootstrapOutcome::Disabled, false);
        }

        if fs.exists(&dependency_dir) {
            debug!(path = %dependency_dir.display(), "Dependency directory present, skipping install");
            return report(BootstrapOutcome::AlreadyPresent, false);
        }

        info!(package = TYPES_PACKAGE, "Installing type declarations");

        let outcome = match run_to_completion(&self.command, root, interrupt).await {
            Ok(ChildOutcome::Exited(status)) if status.success() => BootstrapOutcome::Installed,
            Ok(ChildOutcome::Exited(status)) => {
                BootstrapOutcome::Failed(format!("{} {}", self.command.program, status))
            }
            Ok(ChildOutcome::Interrupted) => BootstrapOutcome::Interrupted,
            Err(e) => BootstrapOutcome::Failed(e.to_string()),
        };

        if let BootstrapOutcome::Failed(reason) = &outcome {
            warn!(
                package = TYPES_PACKAGE,
                reason = %reason,
                "Dependency install failed, type-aware linting may be degraded"
            );
        }

        report(outcome, true)
    }
}

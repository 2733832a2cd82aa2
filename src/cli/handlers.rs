use super::commands::CliArgs;
use crate::config::NofpConfig;
use crate::error::EXIT_FAILURE;
use crate::fs::RealFileSystem;
use crate::pipeline::{RunMode, RunOrchestrator, RunOutcome};
use crate::process::Interrupt;

use anyhow::{bail, Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Environment configuration with command-line overrides applied
pub fn resolve_config(args: &CliArgs) -> NofpConfig {
    let mut config = NofpConfig::default();
    if args.no_bootstrap {
        debug!("Dependency bootstrap disabled from the command line");
        config.bootstrap = false;
    }
    config
}

/// The project root to overlay: `project` or the current directory, canonicalized
pub fn resolve_project_root(project: Option<&Path>) -> Result<PathBuf> {
    let path = match project {
        Some(path) => path.to_path_buf(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !path.exists() {
        bail!("Project path does not exist: {}", path.display());
    }
    if !path.is_dir() {
        bail!("Project path is not a directory: {}", path.display());
    }

    path.canonicalize()
        .with_context(|| format!("Failed to canonicalize project path {}", path.display()))
}

pub async fn handle_run(args: &CliArgs, config: &NofpConfig) -> i32 {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your NOFP_* environment variables and command-line arguments.");
        return EXIT_FAILURE;
    }

    let root = match resolve_project_root(args.project.as_deref()) {
        Ok(root) => root,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_FAILURE;
        }
    };
    debug!("Project root: {}", root.display());

    let mode = if args.install {
        RunMode::InstallOnly
    } else {
        RunMode::Run
    };

    let fs = RealFileSystem::new();
    let orchestrator =
        RunOrchestrator::from_config(&fs, root, config).with_interrupt(Interrupt::listen());

    match orchestrator.execute(mode).await {
        Ok(outcome) => {
            report(&outcome);
            outcome.exit_code()
        }
        Err(e) => {
            eprintln!("nofp: {}", e);
            e.exit_code()
        }
    }
}

fn report(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::AbortedByConflict(paths) => {
            for path in paths {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                eprintln!("{} exists, refusing to run", name);
            }
        }
        RunOutcome::Staged { files, bootstrap } => {
            for file in files {
                info!(path = %file.display(), "Left in place");
            }
            debug!(?bootstrap, "Bootstrap result");
        }
        RunOutcome::Completed {
            status, cleanup, ..
        } => {
            debug!(
                %status,
                removed = cleanup.removed.len(),
                cleanup_failures = cleanup.failures.len(),
                "Run finished"
            );
        }
    }
}

//! nofp - floating promise detection without configuration commitment
//!
//! This library runs ESLint's `@typescript-eslint/no-floating-promises` rule
//! against a project that has no ESLint or TypeScript configuration of its
//! own. It writes both configuration files into the project root, runs the
//! linter through Deno, and removes every file it created afterwards.
//!
//! # Core Concepts
//!
//! - **Overlay**: the two configuration files (and, if it was installed for
//!   the run, `node_modules`) that exist only for the duration of a run
//! - **Guard**: a run refuses to start if either configuration file already
//!   exists, so user files are never overwritten
//! - **Cleanup**: everything the run created is removed on every exit path;
//!   cleanup failures are reported but never change the exit code
//!
//! # Example Usage
//!
//! ```no_run
//! use nofp::{NofpConfig, RealFileSystem, RunMode, RunOrchestrator};
//!
//! # async fn example() -> Result<(), nofp::OverlayError> {
//! let fs = RealFileSystem::new();
//! let config = NofpConfig::default();
//!
//! let outcome = RunOrchestrator::from_config(&fs, "/path/to/project", &config)
//!     .execute(RunMode::Run)
//!     .await?;
//!
//! std::process::exit(outcome.exit_code());
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`overlay`]: conflict guard, materialization and cleanup
//! - [`bootstrap`]: type declaration install into a missing `node_modules`
//! - [`tool`]: the ESLint invocation
//! - [`pipeline`]: sequencing of a whole run

pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod error;
pub mod fs;
pub mod overlay;
pub mod pipeline;
pub mod process;
pub mod tool;
pub mod util;

pub use bootstrap::{BootstrapOutcome, BootstrapReport, DependencyBootstrap};
pub use config::{ConfigError, NofpConfig};
pub use error::OverlayError;
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use overlay::{CleanupReport, GuardOutcome, Overlay, OverlayFile, OverlayKind};
pub use pipeline::{RunMode, RunOrchestrator, RunOutcome, RunPhase};
pub use process::{Interrupt, ToolCommand};
pub use tool::{ToolInvoker, ToolStatus};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_name_is_nofp() {
        assert_eq!(NAME, "nofp");
    }
}

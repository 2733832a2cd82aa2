//! Errors that abort an overlay run
//!
//! Conflicts and materialization failures abort before the analysis tool runs.
//! Launch failures abort after materialization, so cleanup still runs before
//! they reach the caller. Bootstrap and cleanup problems never appear here:
//! they are reported through [`crate::bootstrap::BootstrapOutcome`] and
//! [`crate::overlay::CleanupReport`] instead.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a conflict or any other failure before the tool started
pub const EXIT_FAILURE: i32 = 1;

/// Exit code when the tool executable exists but could not be started
pub const EXIT_CANNOT_EXECUTE: i32 = 126;

/// Exit code when the tool executable could not be found
pub const EXIT_NOT_FOUND: i32 = 127;

#[derive(Debug, Error)]
pub enum OverlayError {
    /// A target configuration path was occupied when it was about to be written
    #[error("{} exists, refusing to run", .0.display())]
    Conflict(PathBuf),

    /// A configuration template could not be read
    #[error("Failed to resolve template {name}: {source}")]
    TemplateResolve {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be written to the project
    #[error("Failed to write {}: {source}", .path.display())]
    Materialize {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The external program could not be started
    #[error("Failed to launch {program}: {source}")]
    ToolLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The external program was started but waiting on it failed
    #[error("Failed to wait for {program}: {source}")]
    ToolWait {
        program: String,
        #[source]
        source: io::Error,
    },
}

impl OverlayError {
    /// Process exit code this error maps to
    pub fn exit_code(&self) -> i32 {
        match self {
            OverlayError::ToolLaunch { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                _ => EXIT_CANNOT_EXECUTE,
            },
            OverlayError::Conflict(_)
            | OverlayError::TemplateResolve { .. }
            | OverlayError::Materialize { .. }
            | OverlayError::ToolWait { .. } => EXIT_FAILURE,
        }
    }
}

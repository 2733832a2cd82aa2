//! Configuration management for nofp
//!
//! Settings are loaded from environment variables with sensible defaults and
//! can be overridden by command-line flags. Only the locations of the external
//! programs are configurable; their argument vectors are fixed.
//!
//! # Environment Variables
//!
//! - `NOFP_DENO`: Deno executable used to run ESLint - default: "deno"
//! - `NOFP_NPM`: npm executable used to install type declarations - default: "npm"
//! - `NOFP_BOOTSTRAP`: Install type declarations when `node_modules` is missing (true|false) - default: "true"
//! - `NOFP_TEMPLATE_DIR`: Directory holding replacement `eslint.config.mjs`/`tsconfig.json` templates - default: unset
//! - `NOFP_LOG_LEVEL`: Logging level - default: "warn"
//! - `NOFP_LOG_JSON`: Emit logs as JSON (true|false) - default: "false"
//!
//! # Example
//!
//! ```no_run
//! use nofp::NofpConfig;
//!
//! let config = NofpConfig::default();
//! config.validate().expect("Invalid configuration");
//! ```

use std::env;
use std::path::PathBuf;
use thiserror::Error;

const DEFAULT_DENO: &str = "deno";
const DEFAULT_NPM: &str = "npm";
const DEFAULT_BOOTSTRAP: bool = true;
const DEFAULT_LOG_LEVEL: &str = "warn";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration validation failed
    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),

    /// Failed to parse configuration value
    #[error("Failed to parse {field}: {error}")]
    ParseError { field: String, error: String },
}

#[derive(Debug, Clone)]
pub struct NofpConfig {
    /// Deno executable
    pub deno: String,

    /// npm executable
    pub npm: String,

    /// Install type declarations into a missing `node_modules`
    pub bootstrap: bool,

    /// Replacement template directory
    pub template_dir: Option<PathBuf>,

    /// Logging level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON
    pub log_json: bool,
}

impl Default for NofpConfig {
    /// Loads configuration from `NOFP_*` environment variables, falling back to defaults
    fn default() -> Self {
        let deno = env::var("NOFP_DENO").unwrap_or_else(|_| DEFAULT_DENO.to_string());
        let npm = env::var("NOFP_NPM").unwrap_or_else(|_| DEFAULT_NPM.to_string());

        let bootstrap = env::var("NOFP_BOOTSTRAP")
            .ok()
            .and_then(|v| Self::parse_flag("NOFP_BOOTSTRAP", &v).ok())
            .unwrap_or(DEFAULT_BOOTSTRAP);

        let template_dir = env::var("NOFP_TEMPLATE_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        let log_level = env::var("NOFP_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("NOFP_LOG_JSON")
            .ok()
            .and_then(|v| Self::parse_flag("NOFP_LOG_JSON", &v).ok())
            .unwrap_or(false);

        Self {
            deno,
            npm,
            bootstrap,
            template_dir,
            log_level,
            log_json,
        }
    }
}

impl NofpConfig {
    /// Checks that:
    /// - Both executables are named
    /// - The template directory, when set, is a directory
    /// - Log level is valid
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.deno.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Deno executable must not be empty".to_string(),
            ));
        }
        if self.npm.trim().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "npm executable must not be empty".to_string(),
            ));
        }

        if let Some(dir) = &self.template_dir {
            if !dir.is_dir() {
                return Err(ConfigError::ValidationFailed(format!(
                    "Template directory is not a directory: {}",
                    dir.display()
                )));
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }

    /// Parse a `true|false` flag the way environment values are parsed
    pub fn parse_flag(field: &str, value: &str) -> Result<bool, ConfigError> {
        value
            .trim()
            .to_lowercase()
            .parse::<bool>()
            .map_err(|e| ConfigError::ParseError {
                field: field.to_string(),
                error: e.to_string(),
            })
    }
}

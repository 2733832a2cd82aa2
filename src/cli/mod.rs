pub mod commands;
pub mod handlers;

pub use commands::CliArgs;
pub use handlers::{handle_run, resolve_config, resolve_project_root};

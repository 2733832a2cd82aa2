//! Project dependency bootstrapping
//!
//! Type-aware lint rules need declaration files for runtime globals. When a
//! project has no `node_modules` of its own, one is installed for the run and
//! handed to the overlay for removal afterwards.

mod dependency;

pub use dependency::{
    install_command, BootstrapOutcome, BootstrapReport, DependencyBootstrap, TYPES_PACKAGE,
};

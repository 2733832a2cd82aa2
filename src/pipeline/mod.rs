//! Run orchestration
//!
//! Sequences the guard, materialization, bootstrap, analysis and cleanup of a
//! single overlay run. Nothing persists between runs.

pub mod orchestrator;

pub use orchestrator::{RunMode, RunOrchestrator, RunOutcome, RunPhase};

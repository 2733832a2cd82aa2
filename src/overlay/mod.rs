//! Ephemeral configuration overlay
//!
//! An overlay is the pair of configuration files the lint run needs
//! (`eslint.config.mjs` and `tsconfig.json`) plus, optionally, a
//! `node_modules` directory installed for the run. Everything written is
//! owned by an [`Overlay`], which removes it again on [`Overlay::cleanup`]
//! or, failing that, when dropped.
//!
//! # Lifecycle
//!
//! 1. [`guard::check`] refuses the run if either target path is occupied
//! 2. [`materializer::materialize`] writes the templates with create-new semantics
//! 3. the run registers a `node_modules` directory it created, if any
//! 4. [`Overlay::cleanup`] removes the files, then the owned directory

pub mod cleanup;
pub mod guard;
pub mod materializer;
pub mod templates;

pub use cleanup::{CleanupFailure, CleanupReport};
pub use guard::GuardOutcome;
pub use templates::TemplateSource;

use crate::fs::FileSystem;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lint-rule configuration file name
pub const ESLINT_CONFIG: &str = "eslint.config.mjs";

/// Type-checking configuration file name
pub const TSCONFIG: &str = "tsconfig.json";

/// Project-local dependency directory
pub const DEPENDENCY_DIR: &str = "node_modules";

/// The two configuration files an overlay consists of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    LintConfig,
    TypeCheckConfig,
}

impl OverlayKind {
    pub const ALL: [OverlayKind; 2] = [OverlayKind::LintConfig, OverlayKind::TypeCheckConfig];

    pub fn file_name(&self) -> &'static str {
        match self {
            OverlayKind::LintConfig => ESLINT_CONFIG,
            OverlayKind::TypeCheckConfig => TSCONFIG,
        }
    }
}

impl fmt::Display for OverlayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// A configuration file to materialize, with the template it comes from
#[derive(Debug, Clone)]
pub struct OverlayFile {
    pub kind: OverlayKind,
    pub source: TemplateSource,
}

impl OverlayFile {
    pub fn new(kind: OverlayKind, source: TemplateSource) -> Self {
        Self { kind, source }
    }

    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Path of this file inside `root`
    pub fn target(&self, root: &Path) -> PathBuf {
        root.join(self.file_name())
    }

    /// Both overlay files, read from `template_dir` when given and from the
    /// templates compiled into the binary otherwise
    pub fn all(template_dir: Option<&Path>) -> Vec<OverlayFile> {
        OverlayKind::ALL
            .iter()
            .map(|&kind| {
                let source = match template_dir {
                    Some(dir) => TemplateSource::File(dir.join(kind.file_name())),
                    None => TemplateSource::embedded(kind),
                };
                OverlayFile::new(kind, source)
            })
            .collect()
    }
}

/// Owner of every path a run created in the project
///
/// Only paths registered here are ever removed. A file that was already in
/// place is never registered, so it can never be cleaned up by mistake.
pub struct Overlay<'a> {
    fs: &'a dyn FileSystem,
    root: PathBuf,
    files: Vec<PathBuf>,
    dependency_dir: Option<PathBuf>,
    armed: bool,
}

impl<'a> Overlay<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
            files: Vec::new(),
            dependency_dir: None,
            armed: true,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn dependency_dir(&self) -> Option<&Path> {
        self.dependency_dir.as_deref()
    }

    /// Record a file this run created
    pub fn register_file(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "Registered overlay file");
        self.files.push(path);
    }

    /// Record that this run created the dependency directory
    pub fn own_dependency_dir(&mut self, path: PathBuf) {
        debug!(path = %path.display(), "Dependency directory owned by this run");
        self.dependency_dir = Some(path);
    }

    /// Remove everything registered, files first
    pub fn cleanup(mut self) -> CleanupReport {
        self.armed = false;
        let files = std::mem::take(&mut self.files);
        let dependency_dir = self.dependency_dir.take();
        cleanup::cleanup(self.fs, &files, dependency_dir.as_deref())
    }

    /// Leave everything in place and return the files that were written
    pub fn keep(mut self) -> Vec<PathBuf> {
        self.armed = false;
        self.dependency_dir = None;
        std::mem::take(&mut self.files)
    }
}

impl Drop for Overlay<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        debug!("Overlay dropped without explicit cleanup");
        cleanup::cleanup(self.fs, &self.files, self.dependency_dir.as_deref());
    }
}

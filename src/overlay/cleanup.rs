//! Removal of everything an overlay run created

use crate::fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// A path that could not be removed
#[derive(Debug, Error)]
#[error("Failed to remove {}: {source}", .path.display())]
pub struct CleanupFailure {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// What cleanup did. Failures are reported here and never propagated.
#[derive(Debug, Default)]
pub struct CleanupReport {
    pub removed: Vec<PathBuf>,
    pub already_absent: Vec<PathBuf>,
    pub failures: Vec<CleanupFailure>,
}

impl CleanupReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn record(&mut self, path: &Path, result: io::Result<()>) {
        match result {
            Ok(()) => {
                debug!(path = %path.display(), "Removed");
                self.removed.push(path.to_path_buf());
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Already removed");
                self.already_absent.push(path.to_path_buf());
            }
            Err(source) => {
                warn!(path = %path.display(), error = %source, "Cleanup failed");
                self.failures.push(CleanupFailure {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

/// Remove `files`, then `dependency_dir` recursively when given.
///
/// Every path is attempted even after a failure.
pub fn cleanup(
    fs: &dyn FileSystem,
    files: &[PathBuf],
    dependency_dir: Option<&Path>,
) -> CleanupReport {
    let mut report = CleanupReport::default();

    for file in files {
        report.record(file, fs.remove_file(file));
    }

    if let Some(dir) = dependency_dir {
        report.record(dir, fs.remove_dir_all(dir));
    }

    if report.is_clean() {
        info!(removed = report.removed.len(), "Overlay cleaned up");
    } else {
        warn!(
            failed = report.failures.len(),
            "Overlay cleanup incomplete, remove the listed paths manually"
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;

    fn overlay_paths() -> Vec<PathBuf> {
        vec![
            PathBuf::from("/mock/eslint.config.mjs"),
            PathBuf::from("/mock/tsconfig.json"),
        ]
    }

    #[test]
    fn test_removes_files_and_owned_dir() {
        let fs = MockFileSystem::new();
        fs.add_file("eslint.config.mjs", "");
        fs.add_file("tsconfig.json", "");
        fs.add_file("node_modules/@types/node/index.d.ts", "");

        let report = cleanup(&fs, &overlay_paths(), Some(Path::new("/mock/node_modules")));

        assert!(report.is_clean());
        assert_eq!(report.removed.len(), 3);
        assert!(!fs.exists(Path::new("node_modules")));
        assert!(!fs.exists(Path::new("tsconfig.json")));
    }

    #[test]
    fn test_dir_not_owned_is_kept() {
        let fs = MockFileSystem::new();
        fs.add_file("eslint.config.mjs", "");
        fs.add_file("tsconfig.json", "");
        fs.add_file("node_modules/left-pad/index.js", "");

        cleanup(&fs, &overlay_paths(), None);

        assert!(fs.exists(Path::new("node_modules/left-pad/index.js")));
    }

    #[test]
    fn test_missing_paths_are_not_failures() {
        let fs = MockFileSystem::new();

        let report = cleanup(&fs, &overlay_paths(), Some(Path::new("/mock/node_modules")));

        assert!(report.is_clean());
        assert_eq!(report.already_absent.len(), 3);
    }

    #[test]
    fn test_failure_does_not_stop_remaining_removals() {
        let fs = MockFileSystem::new();
        fs.add_file("eslint.config.mjs", "");
        fs.add_file("tsconfig.json", "");
        fs.add_dir("node_modules");
        fs.fail_removal("eslint.config.mjs");

        let report = cleanup(&fs, &overlay_paths(), Some(Path::new("/mock/node_modules")));

        assert!(!report.is_clean());
        assert_eq!(report.failures.len(), 1);
        assert_eq!(
            report.failures[0].path,
            PathBuf::from("/mock/eslint.config.mjs")
        );
        assert!(!fs.exists(Path::new("tsconfig.json")));
        assert!(!fs.exists(Path::new("node_modules")));
    }
}

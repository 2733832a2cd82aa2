//! Pre-existing configuration check

use super::OverlayFile;
use crate::fs::FileSystem;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Result of checking the project root before anything is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// No target path is occupied
    Clear,
    /// Every target path that already exists, in overlay order
    Conflict(Vec<PathBuf>),
}

impl GuardOutcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, GuardOutcome::Clear)
    }
}

/// Check whether any overlay file would land on an existing path.
///
/// Performs no writes.
pub fn check(fs: &dyn FileSystem, root: &Path, files: &[OverlayFile]) -> GuardOutcome {
    let conflicts: Vec<PathBuf> = files
        .iter()
        .map(|file| file.target(root))
        .filter(|target| fs.exists(target))
        .collect();

    if conflicts.is_empty() {
        debug!(root = %root.display(), "No configuration conflicts");
        GuardOutcome::Clear
    } else {
        GuardOutcome::Conflict(conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::fs::MockFileSystem;

    #[test]
    fn test_clear_project() {
        let fs = MockFileSystem::new();
        fs.add_file("package.json", "{}");

        let outcome = check(&fs, Path::new("/mock"), &OverlayFile::all(None));

        assert!(outcome.is_clear());
    }

    #[test]
    fn test_existing_tsconfig_conflicts() {
        let fs = MockFileSystem::new();
        fs.add_file("tsconfig.json", "{}");

        let outcome = check(&fs, Path::new("/mock"), &OverlayFile::all(None));

        assert_eq!(
            outcome,
            GuardOutcome::Conflict(vec![PathBuf::from("/mock/tsconfig.json")])
        );
    }

    #[test]
    fn test_reports_every_conflict() {
        let fs = MockFileSystem::new();
        fs.add_file("eslint.config.mjs", "export default [];");
        fs.add_file("tsconfig.json", "{}");

        let outcome = check(&fs, Path::new("/mock"), &OverlayFile::all(None));

        assert_eq!(
            outcome,
            GuardOutcome::Conflict(vec![
                PathBuf::from("/mock/eslint.config.mjs"),
                PathBuf::from("/mock/tsconfig.json"),
            ])
        );
    }

    #[test]
    fn test_directory_at_target_conflicts() {
        let fs = MockFileSystem::new();
        fs.add_dir("eslint.config.mjs");

        let outcome = check(&fs, Path::new("/mock"), &OverlayFile::all(None));

        assert!(!outcome.is_clear());
        assert_eq!(fs.write_count(), 0);
    }
}

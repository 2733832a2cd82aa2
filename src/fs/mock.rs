use super::{CreateNewError, FileSystem};
use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Directory,
}

#[derive(Debug, Clone)]
pub struct MockEntry {
    pub content: Option<Vec<u8>>,
    pub file_type: FileType,
}

/// In-memory file system with failure injection for the write and removal paths
pub struct MockFileSystem {
    files: RwLock<HashMap<PathBuf, MockEntry>>,
    failing_writes: RwLock<HashSet<PathBuf>>,
    failing_removals: RwLock<HashSet<PathBuf>>,
    writes: AtomicUsize,
    root: PathBuf,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::with_root(PathBuf::from("/mock"))
    }

    pub fn with_root(root: PathBuf) -> Self {
        Self {
            files: RwLock::new(HashMap::new()),
            failing_writes: RwLock::new(HashSet::new()),
            failing_removals: RwLock::new(HashSet::new()),
            writes: AtomicUsize::new(0),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        if let Some(parent) = path.parent() {
            Self::ensure_parents(&mut files, parent);
        }

        files.insert(
            path,
            MockEntry {
                content: Some(content.as_bytes().to_vec()),
                file_type: FileType::File,
            },
        );
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        let mut files = self.files.write().unwrap();

        Self::ensure_parents(&mut files, &path);
    }

    /// Make the next `create_new` at `path` leave a truncated file and fail
    pub fn fail_write(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.failing_writes.write().unwrap().insert(path);
    }

    /// Make every removal of `path` fail with `PermissionDenied`
    pub fn fail_removal(&self, path: impl AsRef<Path>) {
        let path = self.normalize_path(path.as_ref());
        self.failing_removals.write().unwrap().insert(path);
    }

    /// Number of `create_new` calls that created an entry
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn entry_count(&self) -> usize {
        self.files.read().unwrap().len()
    }

    fn normalize_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    fn ensure_parents(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            files.entry(current.clone()).or_insert(MockEntry {
                content: None,
                file_type: FileType::Directory,
            });
        }
    }

    fn check_removal(&self, path: &Path) -> io::Result<()> {
        if self.failing_removals.read().unwrap().contains(path) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("removal of {:?} denied", path),
            ));
        }
        Ok(())
    }

    fn entry_type(&self, path: &Path) -> Option<FileType> {
        let path = self.normalize_path(path);
        self.files.read().unwrap().get(&path).map(|e| e.file_type)
    }
}

impl Default for MockFileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for MockFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.entry_type(path).is_some()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::Directory)
    }

    fn is_file(&self, path: &Path) -> bool {
        self.entry_type(path) == Some(FileType::File)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        let path = self.normalize_path(path);
        let files = self.files.read().unwrap();
        let entry = files.get(&path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("File not found: {:?}", path))
        })?;

        entry.content.clone().ok_or_else(|| {
            io::Error::new(io::ErrorKind::Other, format!("Not a file: {:?}", path))
        })
    }

    fn create_new(&self, path: &Path, contents: &[u8]) -> Result<(), CreateNewError> {
        let path = self.normalize_path(path);
        let mut files = self.files.write().unwrap();

        if files.contains_key(&path) {
            return Err(CreateNewError::NotCreated(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{:?} already exists", path),
            )));
        }
        if let Some(parent) = path.parent() {
            if !files.contains_key(parent) {
                return Err(CreateNewError::NotCreated(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("parent of {:?} does not exist", path),
                )));
            }
        }

        self.writes.fetch_add(1, Ordering::SeqCst);

        if self.failing_writes.write().unwrap().remove(&path) {
            let half = contents.len() / 2;
            files.insert(
                path,
                MockEntry {
                    content: Some(contents[..half].to_vec()),
                    file_type: FileType::File,
                },
            );
            return Err(CreateNewError::Incomplete(io::Error::new(
                io::ErrorKind::WriteZero,
                "simulated short write",
            )));
        }

        files.insert(
            path,
            MockEntry {
                content: Some(contents.to_vec()),
                file_type: FileType::File,
            },
        );
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        let path = self.normalize_path(path);
        self.check_removal(&path)?;

        let mut files = self.files.write().unwrap();
        match files.get(&path).map(|e| e.file_type) {
            Some(FileType::File) => {
                files.remove(&path);
                Ok(())
            }
            Some(FileType::Directory) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{:?} is a directory", path),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {:?}", path),
            )),
        }
    }

    fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        let path = self.normalize_path(path);
        self.check_removal(&path)?;

        let mut files = self.files.write().unwrap();
        if files.get(&path).map(|e| e.file_type) != Some(FileType::Directory) {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Directory not found: {:?}", path),
            ));
        }

        files.retain(|p, _| !p.starts_with(&path));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_file() {
        let fs = MockFileSystem::new();
        fs.add_file("eslint.config.mjs", "export default [];");

        assert!(fs.exists(Path::new("eslint.config.mjs")));
        assert!(fs.is_file(Path::new("/mock/eslint.config.mjs")));
        assert!(fs.is_dir(Path::new("/mock")));
    }

    #[test]
    fn test_create_new_counts_writes() {
        let fs = MockFileSystem::new();
        fs.add_dir("/mock");

        fs.create_new(Path::new("a.json"), b"{}").unwrap();
        assert!(fs.create_new(Path::new("a.json"), b"{}").is_err());

        assert_eq!(fs.write_count(), 1);
        assert_eq!(fs.read(Path::new("a.json")).unwrap(), b"{}");
    }

    #[test]
    fn test_fail_write_leaves_partial_file() {
        let fs = MockFileSystem::new();
        fs.add_dir("/mock");
        fs.fail_write("tsconfig.json");

        let err = fs
            .create_new(Path::new("tsconfig.json"), b"0123456789")
            .unwrap_err();

        assert!(err.created());
        assert_eq!(fs.read(Path::new("tsconfig.json")).unwrap(), b"01234");
    }

    #[test]
    fn test_remove_dir_all_removes_children() {
        let fs = MockFileSystem::new();
        fs.add_file("node_modules/left-pad/index.js", "");

        fs.remove_dir_all(Path::new("node_modules")).unwrap();

        assert!(!fs.exists(Path::new("node_modules")));
        assert!(!fs.exists(Path::new("node_modules/left-pad/index.js")));
        assert!(fs.exists(Path::new("/mock")));
    }

    #[test]
    fn test_fail_removal() {
        let fs = MockFileSystem::new();
        fs.add_file("tsconfig.json", "{}");
        fs.fail_removal("tsconfig.json");

        let err = fs.remove_file(Path::new("tsconfig.json")).unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(fs.exists(Path::new("tsconfig.json")));
    }
}

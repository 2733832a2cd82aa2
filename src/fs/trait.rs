//! FileSystem trait definition

use std::io;
use std::path::Path;
use thiserror::Error;

/// Failure of a create-new write, split by whether the file now exists
#[derive(Debug, Error)]
pub enum CreateNewError {
    /// Nothing was created at the path
    #[error("file was not created: {0}")]
    NotCreated(#[source] io::Error),

    /// The file was created but its contents were not fully written
    #[error("file was created but not fully written: {0}")]
    Incomplete(#[source] io::Error),
}

impl CreateNewError {
    /// Whether a (possibly partial) file was left behind at the path
    pub fn created(&self) -> bool {
        matches!(self, CreateNewError::Incomplete(_))
    }

    pub fn io_error(&self) -> &io::Error {
        match self {
            CreateNewError::NotCreated(e) | CreateNewError::Incomplete(e) => e,
        }
    }

    pub fn into_io_error(self) -> io::Error {
        match self {
            CreateNewError::NotCreated(e) | CreateNewError::Incomplete(e) => e,
        }
    }
}

/// Abstraction over the file system operations an overlay run performs
pub trait FileSystem: Send + Sync {
    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Check if path is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Check if path is a file
    fn is_file(&self, path: &Path) -> bool;

    /// Read the full contents of a file
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Create `path` and write `contents` to it, failing if anything already exists there
    fn create_new(&self, path: &Path, contents: &[u8]) -> Result<(), CreateNewError>;

    /// Remove a single file
    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Remove a directory and everything below it
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;
}

//! FileSystem abstraction for testable file operations

mod mock;
mod real;
mod r#trait;

pub use mock::{FileType, MockEntry, MockFileSystem};
pub use r#trait::{CreateNewError, FileSystem};
pub use real::RealFileSystem;

mod real;

#[cfg(test)]
mod mock;

pub use real::RealFileSystem;

#[cfg(test)]
pub use mock::MockFileSystem;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// The filesystem queries a scan needs. Listing files and listing
/// subdirectories are separate queries; either may fail independently.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Full paths of the non-directory entries directly inside `dir`.
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;

    /// Reported byte length of a file returned by [`FileSystem::list_files`].
    async fn file_len(&self, file: &Path) -> Result<u64>;

    /// Full paths of the subdirectories directly inside `dir`.
    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::task;

use super::FileSystem;

/// Reads the live filesystem. Symbolic links are never followed: a link is
/// listed as a file, whatever it points at.
pub struct RealFileSystem;

impl RealFileSystem {
    async fn list(dir: &Path, want_dirs: bool) -> Result<Vec<PathBuf>> {
        let dir = dir.to_path_buf();
        task::spawn_blocking(move || {
            let mut entries = Vec::new();
            let read_dir = std::fs::read_dir(&dir)
                .with_context(|| format!("cannot read directory {}", dir.display()))?;
            for entry in read_dir {
                let entry =
                    entry.with_context(|| format!("cannot read entry in {}", dir.display()))?;
                let file_type = entry
                    .file_type()
                    .with_context(|| format!("cannot stat {}", entry.path().display()))?;
                if file_type.is_dir() == want_dirs {
                    entries.push(entry.path());
                }
            }
            entries.sort();
            Ok(entries)
        })
        .await?
    }
}

#[async_trait]
impl FileSystem for RealFileSystem {
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::list(dir, false).await
    }

    async fn file_len(&self, file: &Path) -> Result<u64> {
        let metadata = tokio::fs::symlink_metadata(file)
            .await
            .with_context(|| format!("cannot stat {}", file.display()))?;
        Ok(metadata.len())
    }

    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        Self::list(dir, true).await
    }
}

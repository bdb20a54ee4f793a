use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::FileSystem;

#[derive(Clone, Debug)]
enum Listing {
    Ok {
        files: Vec<(PathBuf, u64)>,
        dirs: Vec<PathBuf>,
    },
    Err(String),
}

/// Scripted filesystem. Each directory is described once with its files
/// (and their lengths) and subdirectories, or with an error message.
#[derive(Clone, Default)]
pub struct MockFileSystem {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    listings: HashMap<PathBuf, Listing>,
    len_errors: HashMap<PathBuf, String>,
    dir_errors: HashMap<PathBuf, String>,
    calls: Vec<PathBuf>,
}

impl MockFileSystem {
    pub fn set_dir(&self, dir: impl Into<PathBuf>, files: &[(&str, u64)], dirs: &[&str]) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.listings.insert(
            dir.into(),
            Listing::Ok {
                files: files
                    .iter()
                    .map(|(path, len)| (PathBuf::from(path), *len))
                    .collect(),
                dirs: dirs.iter().map(PathBuf::from).collect(),
            },
        );
    }

    /// Make every query on `dir` fail.
    pub fn set_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner
            .listings
            .insert(dir.into(), Listing::Err(message.into()));
    }

    /// Make only the subdirectory query on `dir` fail.
    pub fn set_dirs_error(&self, dir: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.dir_errors.insert(dir.into(), message.into());
    }

    /// Make the length query for one file fail.
    pub fn set_len_error(&self, file: impl Into<PathBuf>, message: impl Into<String>) {
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.len_errors.insert(file.into(), message.into());
    }

    /// Directories whose files were listed, in call order.
    pub fn calls(&self) -> Vec<PathBuf> {
        let inner = self.inner.lock().expect("mock fs lock");
        inner.calls.clone()
    }

    fn listing(inner: &Inner, dir: &Path) -> Result<(Vec<(PathBuf, u64)>, Vec<PathBuf>)> {
        match inner.listings.get(dir) {
            Some(Listing::Ok { files, dirs }) => Ok((files.clone(), dirs.clone())),
            Some(Listing::Err(message)) => Err(anyhow!("{message}")),
            None => Err(anyhow!("no mock response for {}", dir.display())),
        }
    }
}

#[async_trait]
impl FileSystem for MockFileSystem {
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        tokio::task::yield_now().await;
        let mut inner = self.inner.lock().expect("mock fs lock");
        inner.calls.push(dir.to_path_buf());
        let (files, _) = Self::listing(&inner, dir)?;
        Ok(files.into_iter().map(|(path, _)| path).collect())
    }

    async fn file_len(&self, file: &Path) -> Result<u64> {
        let inner = self.inner.lock().expect("mock fs lock");
        if let Some(message) = inner.len_errors.get(file) {
            return Err(anyhow!("{message}"));
        }
        let dir = file
            .parent()
            .ok_or_else(|| anyhow!("no parent for {}", file.display()))?;
        let (files, _) = Self::listing(&inner, dir)?;
        files
            .into_iter()
            .find(|(path, _)| path == file)
            .map(|(_, len)| len)
            .ok_or_else(|| anyhow!("no mock file {}", file.display()))
    }

    async fn list_dirs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let inner = self.inner.lock().expect("mock fs lock");
        if let Some(message) = inner.dir_errors.get(dir) {
            return Err(anyhow!("{message}"));
        }
        let (_, dirs) = Self::listing(&inner, dir)?;
        Ok(dirs)
    }
}

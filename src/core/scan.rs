use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace, warn};

use super::error::ScanError;
use super::host::{NoProgress, ProgressSink};
use crate::fs::FileSystem;
use crate::models::{NodeId, Tree};

/// Shared flag a host can raise to stop a running scan.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// A folder whose expansion failed part-way.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubtreeError {
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for SubtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path.display(), self.message)
    }
}

/// Result of a finished scan: the tree, possibly incomplete, plus every
/// per-folder failure met on the way.
#[derive(Clone, Debug)]
pub struct ScanReport {
    pub tree: Tree,
    pub errors: Vec<SubtreeError>,
}

impl ScanReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }

    /// Aggregate error text, one line per failure. Empty when the scan
    /// succeeded everywhere.
    pub fn error_log(&self) -> String {
        error_log(&self.errors)
    }
}

pub(crate) fn error_log(errors: &[SubtreeError]) -> String {
    errors.iter().map(|err| format!("{err}\n")).collect()
}

/// Builds a size-aggregated [`Tree`] from a root directory.
///
/// Traversal uses an explicit stack of folders awaiting expansion. Each
/// folder attaches all of its files before pushing its subdirectories, so
/// sibling subdirectories are expanded last-listed first. A failure while
/// expanding one folder is recorded and the scan moves on; whatever that
/// folder had attached is kept.
pub struct Scanner<'a, F: FileSystem> {
    fs: &'a F,
    progress: &'a dyn ProgressSink,
    cancel: Option<&'a CancelFlag>,
}

impl<'a, F: FileSystem> Scanner<'a, F> {
    pub fn new(fs: &'a F) -> Self {
        Self {
            fs,
            progress: &NoProgress,
            cancel: None,
        }
    }

    pub fn with_progress(mut self, progress: &'a dyn ProgressSink) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancel(mut self, cancel: &'a CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub async fn scan(&self, root: &Path) -> Result<ScanReport, ScanError> {
        info!(root = %root.display(), "starting scan");

        let mut tree = Tree::new(root);
        let mut errors = Vec::new();
        let mut stack = vec![tree.root()];

        while let Some(folder) = stack.pop() {
            if self.cancel.is_some_and(CancelFlag::is_cancelled) {
                warn!(root = %root.display(), "scan cancelled");
                return Err(ScanError::Cancelled);
            }

            if let Err(err) = self.expand(&mut tree, folder, &mut stack).await {
                let path = tree[folder].path().to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable folder");
                errors.push(SubtreeError {
                    path,
                    message: format!("{err:#}"),
                });
            }
        }

        info!(
            root = %root.display(),
            bytes = tree[tree.root()].size(),
            entries = tree.node_count(),
            failures = errors.len(),
            "scan finished"
        );
        Ok(ScanReport { tree, errors })
    }

    async fn expand(
        &self,
        tree: &mut Tree,
        folder: NodeId,
        stack: &mut Vec<NodeId>,
    ) -> anyhow::Result<()> {
        let dir = tree[folder].path().to_path_buf();
        trace!(dir = %dir.display(), "expanding folder");

        for file in self.fs.list_files(&dir).await? {
            let len = self.fs.file_len(&file).await?;
            self.progress.notify(&file);
            tree.add_file(folder, file, len);
        }

        for subdir in self.fs.list_dirs(&dir).await? {
            self.progress.notify(&subdir);
            if let Some(child) = tree.add_folder(folder, subdir) {
                stack.push(child);
            }
        }

        debug!(dir = %dir.display(), children = tree.children(folder).len(), "folder expanded");
        Ok(())
    }
}

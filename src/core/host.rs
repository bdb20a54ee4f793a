//! Interfaces to the collaborators around the core: progress display, the
//! task that runs a scan off the interactive thread, OS deletion and the
//! file manager.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::{DeleteError, ScanError};
use super::scan::{CancelFlag, ScanReport, Scanner};
use crate::fs::FileSystem;
use crate::models::EntryKind;

/// Receives the path of every file and folder as a scan discovers it.
/// Implementations must return quickly and never fail.
pub trait ProgressSink: Send + Sync {
    fn notify(&self, path: &Path);
}

impl<F> ProgressSink for F
where
    F: Fn(&Path) + Send + Sync,
{
    fn notify(&self, path: &Path) {
        self(path)
    }
}

pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn notify(&self, _path: &Path) {}
}

/// A scan running on its own tokio task.
pub struct ScanTask {
    /// Paths discovered so far. Closed once the scan ends.
    pub progress: mpsc::UnboundedReceiver<PathBuf>,
    cancel: CancelFlag,
    handle: JoinHandle<Result<ScanReport, ScanError>>,
}

impl ScanTask {
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Wait for the scan. A panic inside the task becomes [`ScanError::Task`].
    pub async fn finish(self) -> Result<ScanReport, ScanError> {
        self.handle.await?
    }
}

/// Start scanning `root` on a new task. Progress is forwarded over an
/// unbounded channel so the scan never waits on its observer.
pub fn spawn_scan<F>(fs: Arc<F>, root: PathBuf, cancel: CancelFlag) -> ScanTask
where
    F: FileSystem + 'static,
{
    let (tx, progress) = mpsc::unbounded_channel();
    let task_cancel = cancel.clone();
    let handle = tokio::spawn(async move {
        let sink = move |path: &Path| {
            let _ = tx.send(path.to_path_buf());
        };
        Scanner::new(fs.as_ref())
            .with_progress(&sink)
            .with_cancel(&task_cancel)
            .scan(&root)
            .await
    });

    ScanTask {
        progress,
        cancel,
        handle,
    }
}

/// Deletes an entry from disk, typically after asking the user.
#[async_trait]
pub trait DeletionHost: Send + Sync {
    /// Returns [`DeleteError::Cancelled`] when the user declines.
    async fn delete(&self, path: &Path, kind: EntryKind) -> Result<(), DeleteError>;
}

/// Opens a file manager with `path` selected.
pub trait ShellIntegration {
    fn reveal(&self, path: &Path) -> anyhow::Result<()>;
}

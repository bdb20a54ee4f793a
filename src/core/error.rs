//! Error types for the `core` module.

use std::path::PathBuf;
use thiserror::Error;

/// Failure of a whole scan. Per-folder failures never surface here; they are
/// collected in [`super::scan::ScanReport::errors`].
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("scan was cancelled")]
    Cancelled,

    /// The task running the scan panicked or was aborted.
    #[error("scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Rejected user input. The message is meant to be shown next to the field.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("a directory to inspect is required")]
    EmptyRoot,

    #[error("directory does not exist: {0}")]
    RootNotFound(PathBuf),

    #[error("not a directory: {0}")]
    RootNotDirectory(PathBuf),

    #[error("size filter is not a number: {0}")]
    ThresholdNotNumber(String),

    #[error("size filter must be a finite, non-negative number: {0}")]
    ThresholdOutOfRange(String),
}

/// Failure reported by a [`super::host::DeletionHost`].
#[derive(Debug, Error)]
pub enum DeleteError {
    /// The user declined the confirmation prompt.
    #[error("deletion was cancelled")]
    Cancelled,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no scan results are loaded")]
    NoTree,

    #[error("entry is not part of the current tree")]
    UnknownEntry,

    #[error("entry cannot be deleted: {0}")]
    NotDeletable(PathBuf),

    #[error("failed to delete {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: DeleteError,
    },

    #[error("failed to open {path}: {source:#}")]
    Reveal {
        path: PathBuf,
        source: anyhow::Error,
    },
}

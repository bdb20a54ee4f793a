use std::path::PathBuf;

use tracing::{debug, info};

use super::error::{DeleteError, SessionError, ValidationError};
use super::filter::{FilterSettings, apply_filter};
use super::host::{DeletionHost, ShellIntegration};
use super::scan::{ScanReport, SubtreeError, error_log};
use super::validate::parse_threshold;
use crate::models::{NodeId, Tree};

/// Thresholds closer than this are treated as unchanged.
const THRESHOLD_EPSILON: f64 = 1e-9;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScanStatus {
    Succeeded,
    SucceededWithErrors,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DeleteOutcome {
    Deleted,
    /// The user declined; nothing changed.
    Cancelled,
}

/// The current scan result together with the filter settings applied to it.
///
/// Every setter that changes a filter input re-runs the visibility pass
/// immediately.
#[derive(Debug, Default)]
pub struct Session {
    tree: Option<Tree>,
    errors: Vec<SubtreeError>,
    settings: FilterSettings,
}

impl Session {
    pub fn new(settings: FilterSettings) -> Self {
        Self {
            tree: None,
            errors: Vec::new(),
            settings,
        }
    }

    pub fn tree(&self) -> Option<&Tree> {
        self.tree.as_ref()
    }

    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    pub fn errors(&self) -> &[SubtreeError] {
        &self.errors
    }

    pub fn error_log(&self) -> String {
        error_log(&self.errors)
    }

    /// `None` until a scan has been installed.
    pub fn status(&self) -> Option<ScanStatus> {
        self.tree.as_ref()?;
        if self.errors.is_empty() {
            Some(ScanStatus::Succeeded)
        } else {
            Some(ScanStatus::SucceededWithErrors)
        }
    }

    /// Drop the current results, e.g. when a new scan starts.
    pub fn clear(&mut self) {
        self.tree = None;
        self.errors.clear();
    }

    /// Replace the current tree with a finished scan.
    pub fn install(&mut self, report: ScanReport) {
        let ScanReport { mut tree, errors } = report;
        let root = tree.root();
        if let Some(node) = tree.get_mut(root) {
            node.expanded = true;
        }
        info!(
            root = %tree[root].path().display(),
            failures = errors.len(),
            "scan installed"
        );
        self.tree = Some(tree);
        self.errors = errors;
        self.refresh();
    }

    /// Re-run the visibility pass with the current settings.
    pub fn refresh(&mut self) {
        if let Some(tree) = self.tree.as_mut() {
            apply_filter(tree, &self.settings);
        }
    }

    pub fn set_threshold(&mut self, threshold_mib: f64) {
        if (self.settings.threshold_mib - threshold_mib).abs() < THRESHOLD_EPSILON {
            return;
        }
        debug!(threshold_mib, "threshold changed");
        self.settings.threshold_mib = threshold_mib;
        self.refresh();
    }

    /// Apply threshold text as typed by the user. Blank text selects the
    /// default; invalid text leaves the threshold unchanged.
    pub fn set_threshold_text(&mut self, text: &str) -> Result<f64, ValidationError> {
        let threshold = parse_threshold(text)?;
        self.set_threshold(threshold);
        Ok(threshold)
    }

    pub fn set_hide_below(&mut self, hide: bool) {
        if self.settings.hide_below != hide {
            self.settings.hide_below = hide;
            self.refresh();
        }
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        if self.settings.highlight_above != highlight {
            self.settings.highlight_above = highlight;
            self.refresh();
        }
    }

    pub fn can_delete(&self, id: NodeId) -> bool {
        self.tree.as_ref().is_some_and(|tree| tree.can_remove(id))
    }

    /// Delete an entry on disk through `host`, then drop it from the tree.
    ///
    /// The tree is only changed after the host succeeds. Folder sizes above
    /// the entry shrink accordingly and the visibility pass is re-run.
    pub async fn delete<D>(&mut self, id: NodeId, host: &D) -> Result<DeleteOutcome, SessionError>
    where
        D: DeletionHost + ?Sized,
    {
        let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
        let node = tree.get(id).ok_or(SessionError::UnknownEntry)?;
        let path = node.path().to_path_buf();
        if !tree.can_remove(id) {
            return Err(SessionError::NotDeletable(path));
        }

        match host.delete(&path, node.kind()).await {
            Ok(()) => {
                if let Some(tree) = self.tree.as_mut() {
                    tree.remove(id);
                }
                info!(path = %path.display(), "entry deleted");
                self.refresh();
                Ok(DeleteOutcome::Deleted)
            }
            Err(DeleteError::Cancelled) => {
                debug!(path = %path.display(), "deletion cancelled");
                Ok(DeleteOutcome::Cancelled)
            }
            Err(source) => Err(SessionError::Delete { path, source }),
        }
    }

    /// Show an entry in the platform file manager.
    pub fn reveal<S>(&self, id: NodeId, shell: &S) -> Result<(), SessionError>
    where
        S: ShellIntegration + ?Sized,
    {
        let path = self.entry_path(id)?;
        shell
            .reveal(&path)
            .map_err(|source| SessionError::Reveal { path, source })
    }

    fn entry_path(&self, id: NodeId) -> Result<PathBuf, SessionError> {
        let tree = self.tree.as_ref().ok_or(SessionError::NoTree)?;
        tree.get(id)
            .map(|node| node.path().to_path_buf())
            .ok_or(SessionError::UnknownEntry)
    }
}

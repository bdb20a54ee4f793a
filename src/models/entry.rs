use std::path::{Path, PathBuf};

use super::NodeId;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EntryKind {
    File,
    Folder,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NodeKind {
    File,
    /// Children in discovery order.
    Folder { children: Vec<NodeId> },
}

/// A file or folder in a scanned tree.
///
/// Structure (`path`, `size`, `parent`, `children`) is owned by [`super::Tree`];
/// only the presentation flags are public.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Node {
    pub(super) path: PathBuf,
    pub(super) kind: NodeKind,
    pub(super) size: u64,
    pub(super) parent: Option<NodeId>,
    pub visible: bool,
    pub highlighted: bool,
    pub expanded: bool,
}

impl Node {
    pub(super) fn file(path: PathBuf, len: u64, parent: NodeId) -> Self {
        Self {
            path,
            kind: NodeKind::File,
            size: len,
            parent: Some(parent),
            visible: true,
            highlighted: false,
            expanded: false,
        }
    }

    pub(super) fn folder(path: PathBuf, parent: Option<NodeId>) -> Self {
        Self {
            path,
            kind: NodeKind::Folder {
                children: Vec::new(),
            },
            size: 0,
            parent,
            visible: true,
            highlighted: false,
            expanded: false,
        }
    }

    /// Full path of the entry as discovered during the scan.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Byte length for files, aggregated byte length for folders.
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn kind(&self) -> EntryKind {
        match self.kind {
            NodeKind::File => EntryKind::File,
            NodeKind::Folder { .. } => EntryKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder { .. })
    }

    pub fn children(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::File => &[],
            NodeKind::Folder { children } => children,
        }
    }
}

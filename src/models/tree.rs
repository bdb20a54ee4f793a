use std::ops::Index;
use std::path::PathBuf;

use super::{Node, NodeKind};

/// Handle to a node inside the [`Tree`] that created it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct NodeId(usize);

/// Arena-backed file tree rooted at a single folder.
///
/// Folders own their children through `children`; `parent` is a lookup-only
/// back edge. Every folder's size is kept equal to the sum of its children's
/// sizes while the tree is built and when entries are removed.
#[derive(Clone, Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Tree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            nodes: vec![Node::folder(root.into(), None)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        id == self.root
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    /// Number of nodes ever allocated, the root and detached ones included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Attach a file of `len` bytes to `parent` and add `len` to every
    /// ancestor folder up to the root.
    ///
    /// Returns `None` when `parent` is not a folder of this tree.
    pub fn add_file(
        &mut self,
        parent: NodeId,
        path: impl Into<PathBuf>,
        len: u64,
    ) -> Option<NodeId> {
        let id = self.attach(parent, Node::file(path.into(), len, parent))?;
        self.propagate(parent, |size| size.saturating_add(len));
        Some(id)
    }

    /// Attach an empty folder to `parent`. Its size grows as files are added
    /// beneath it.
    pub fn add_folder(&mut self, parent: NodeId, path: impl Into<PathBuf>) -> Option<NodeId> {
        self.attach(parent, Node::folder(path.into(), Some(parent)))
    }

    /// An entry can be removed when it still has a parent: never the root,
    /// never an entry that was already removed.
    pub fn can_remove(&self, id: NodeId) -> bool {
        self.parent(id).is_some()
    }

    /// Detach `id` from its parent and subtract its size from every ancestor.
    ///
    /// The detached subtree stays allocated but is no longer reachable from
    /// the root. Returns `false` when there was nothing to remove.
    pub fn remove(&mut self, id: NodeId) -> bool {
        let Some(parent) = self.parent(id) else {
            return false;
        };

        let removed = match &mut self.nodes[parent.0].kind {
            NodeKind::Folder { children } => {
                let before = children.len();
                children.retain(|child| *child != id);
                children.len() != before
            }
            NodeKind::File => false,
        };
        if !removed {
            return false;
        }

        let size = self.nodes[id.0].size;
        self.nodes[id.0].parent = None;
        self.propagate(parent, |total| total.saturating_sub(size));
        true
    }

    /// Pre-order walk of the subtree under `id`, `id` included.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let stack = if self.get(id).is_some() { vec![id] } else { Vec::new() };
        Descendants { tree: self, stack }
    }

    fn attach(&mut self, parent: NodeId, node: Node) -> Option<NodeId> {
        let id = NodeId(self.nodes.len());
        match &mut self.nodes.get_mut(parent.0)?.kind {
            NodeKind::Folder { children } => children.push(id),
            NodeKind::File => return None,
        }
        self.nodes.push(node);
        Some(id)
    }

    fn propagate(&mut self, from: NodeId, update: impl Fn(u64) -> u64) {
        let mut cursor = Some(from);
        while let Some(id) = cursor {
            let node = &mut self.nodes[id.0];
            node.size = update(node.size);
            cursor = node.parent;
        }
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }
}

pub struct Descendants<'a> {
    tree: &'a Tree,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.tree.children(id).iter().rev().copied());
        Some(id)
    }
}

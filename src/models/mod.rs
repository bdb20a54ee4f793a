mod entry;
mod tree;

pub use entry::{EntryKind, Node, NodeKind};
pub use tree::{Descendants, NodeId, Tree};

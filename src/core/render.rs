use std::io::{self, Write};

use crate::display_name;
use crate::models::{NodeId, Tree};

#[derive(Clone, Copy, Debug, Default)]
pub struct RenderOptions {
    /// Deepest level of entries to print below the root (None means unlimited).
    pub max_depth: Option<usize>,
}

/// Print the root and its visible descendants as an ASCII tree.
///
/// Hidden entries are skipped together with their subtrees. Highlighted
/// entries end with ` *`.
pub fn write_tree<W: Write>(
    writer: &mut W,
    tree: &Tree,
    options: &RenderOptions,
) -> io::Result<()> {
    let root = tree.root();
    write_label(writer, tree, root, true)?;
    writer.write_all(b"\n")?;

    // (node, is_last among visible siblings, ancestors' "has more" markers)
    let mut stack: Vec<(NodeId, bool, Vec<bool>)> = Vec::new();
    if options.max_depth.is_none_or(|max| max > 0) {
        push_children(&mut stack, tree, root, &[]);
    }

    while let Some((id, is_last, ancestor_has_more)) = stack.pop() {
        for &has_more in &ancestor_has_more {
            if has_more {
                writer.write_all(b"|   ")?;
            } else {
                writer.write_all(b"    ")?;
            }
        }

        if is_last {
            writer.write_all(b"`-- ")?;
        } else {
            writer.write_all(b"|-- ")?;
        }

        write_label(writer, tree, id, false)?;
        writer.write_all(b"\n")?;

        let depth = ancestor_has_more.len() + 1;
        if options.max_depth.is_none_or(|max| depth < max) {
            let mut next_ancestor_has_more = ancestor_has_more;
            next_ancestor_has_more.push(!is_last);
            push_children(&mut stack, tree, id, &next_ancestor_has_more);
        }
    }

    Ok(())
}

fn push_children(
    stack: &mut Vec<(NodeId, bool, Vec<bool>)>,
    tree: &Tree,
    id: NodeId,
    ancestor_has_more: &[bool],
) {
    let visible: Vec<NodeId> = tree
        .children(id)
        .iter()
        .copied()
        .filter(|child| tree[*child].visible)
        .collect();
    let count = visible.len();
    for (index, child) in visible.into_iter().enumerate().rev() {
        stack.push((child, index + 1 == count, ancestor_has_more.to_vec()));
    }
}

fn write_label<W: Write>(
    writer: &mut W,
    tree: &Tree,
    id: NodeId,
    is_root: bool,
) -> io::Result<()> {
    let node = &tree[id];
    let name = if is_root {
        node.path().display().to_string()
    } else {
        display_name(node.path())
    };
    let suffix = if node.is_folder() && !is_root { "/" } else { "" };
    write!(writer, "{name}{suffix} [{}]", format_size(node.size()))?;
    if node.highlighted {
        writer.write_all(b" *")?;
    }
    Ok(())
}

/// Human readable binary size, e.g. `512 B`, `1.5 KiB`, `7.0 MiB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["KiB", "MiB", "GiB", "TiB", "PiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

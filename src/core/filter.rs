use tracing::debug;

use crate::models::Tree;

pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Default size threshold, in mebibytes.
pub const DEFAULT_THRESHOLD_MIB: f64 = 1.0;

/// Inputs of a visibility pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilterSettings {
    /// Size threshold in mebibytes.
    pub threshold_mib: f64,
    /// Hide entries smaller than the threshold.
    pub hide_below: bool,
    /// Highlight entries at or over the threshold.
    pub highlight_above: bool,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            threshold_mib: DEFAULT_THRESHOLD_MIB,
            hide_below: false,
            highlight_above: true,
        }
    }
}

impl FilterSettings {
    pub fn threshold_bytes(&self) -> f64 {
        self.threshold_mib * BYTES_PER_MIB
    }
}

/// Recompute `visible` and `highlighted` for the entries under the root.
///
/// Every visited entry is reset first. Entries at or over the threshold are
/// highlighted (when enabled) and, if they are folders, their children are
/// visited in turn. Entries under the threshold are hidden (when enabled) and
/// their subtrees are left alone. The root itself is never touched.
pub fn apply_filter(tree: &mut Tree, settings: &FilterSettings) {
    let threshold = settings.threshold_bytes();
    let mut stack = vec![tree.root()];
    let mut visited = 0usize;

    while let Some(folder) = stack.pop() {
        let children = tree.children(folder).to_vec();
        for child in children {
            let Some(node) = tree.get_mut(child) else {
                continue;
            };
            visited += 1;

            node.highlighted = false;
            node.visible = true;

            if node.size() as f64 >= threshold {
                if settings.highlight_above {
                    node.highlighted = true;
                }
                if node.is_folder() {
                    stack.push(child);
                }
            } else if settings.hide_below {
                node.visible = false;
            }
        }
    }

    debug!(
        threshold_mib = settings.threshold_mib,
        hide_below = settings.hide_below,
        highlight_above = settings.highlight_above,
        visited,
        "visibility pass"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NodeId;

    const MIB: u64 = 1024 * 1024;

    struct Sample {
        tree: Tree,
        a: NodeId,
        sub: NodeId,
        b: NodeId,
    }

    fn sample() -> Sample {
        let mut tree = Tree::new("/r");
        let root = tree.root();
        let a = tree.add_file(root, "/r/a", 2 * MIB).unwrap();
        let sub = tree.add_folder(root, "/r/sub").unwrap();
        let b = tree.add_file(sub, "/r/sub/b", 5 * MIB).unwrap();
        Sample { tree, a, sub, b }
    }

    fn settings(threshold_mib: f64, hide_below: bool, highlight_above: bool) -> FilterSettings {
        FilterSettings {
            threshold_mib,
            hide_below,
            highlight_above,
        }
    }

    fn flags(tree: &Tree) -> Vec<(bool, bool)> {
        tree.descendants(tree.root())
            .map(|id| (tree[id].visible, tree[id].highlighted))
            .collect()
    }

    fn highlighted(tree: &Tree) -> Vec<NodeId> {
        tree.descendants(tree.root())
            .filter(|id| tree[*id].highlighted)
            .collect()
    }

    #[test]
    fn hides_small_and_highlights_large_entries() {
        let Sample { mut tree, a, sub, b } = sample();
        apply_filter(&mut tree, &settings(3.0, true, true));

        assert!(!tree[a].visible);
        assert!(!tree[a].highlighted);
        assert!(tree[sub].visible);
        assert!(tree[sub].highlighted);
        assert!(tree[b].visible);
        assert!(tree[b].highlighted);
    }

    #[test]
    fn threshold_is_inclusive() {
        let Sample { mut tree, sub, .. } = sample();
        apply_filter(&mut tree, &settings(5.0, true, true));
        assert!(tree[sub].highlighted);
        assert!(tree[sub].visible);
    }

    #[test]
    fn root_flags_are_untouched() {
        let Sample { mut tree, .. } = sample();
        let root = tree.root();
        apply_filter(&mut tree, &settings(100.0, true, true));
        assert!(tree[root].visible);
        assert!(!tree[root].highlighted);
    }

    #[test]
    fn highlight_toggle_off_only_clears_highlights() {
        let Sample { mut tree, a, sub, b } = sample();
        apply_filter(&mut tree, &settings(3.0, true, true));
        apply_filter(&mut tree, &settings(3.0, true, false));

        assert!(highlighted(&tree).is_empty());
        assert!(!tree[a].visible);
        assert!(tree[sub].visible);
        assert!(tree[b].visible);
    }

    #[test]
    fn entries_below_threshold_are_not_descended() {
        let Sample { mut tree, sub, b, .. } = sample();
        apply_filter(&mut tree, &settings(1.0, false, true));
        assert!(tree[b].highlighted);

        apply_filter(&mut tree, &settings(6.0, true, true));
        assert!(!tree[sub].visible);
        assert!(!tree[sub].highlighted);
        // Left over from the previous pass: the hidden folder was not entered.
        assert!(tree[b].highlighted);
        assert!(tree[b].visible);
    }

    #[test]
    fn running_twice_is_idempotent() {
        let Sample { mut tree, .. } = sample();
        let s = settings(3.0, true, true);
        apply_filter(&mut tree, &s);
        let once = flags(&tree);
        apply_filter(&mut tree, &s);
        assert_eq!(flags(&tree), once);
    }

    #[test]
    fn raising_threshold_never_adds_highlights() {
        let thresholds = [0.0, 1.0, 2.0, 3.0, 5.0, 6.0, 7.0, 8.0];
        let mut previous: Option<Vec<NodeId>> = None;
        for threshold in thresholds {
            let Sample { mut tree, .. } = sample();
            apply_filter(&mut tree, &settings(threshold, false, true));
            let current = highlighted(&tree);
            if let Some(previous) = previous {
                assert!(current.iter().all(|id| previous.contains(id)));
            }
            previous = Some(current);
        }
    }

    #[test]
    fn defaults_match_a_fresh_session() {
        let s = FilterSettings::default();
        assert_eq!(s.threshold_mib, 1.0);
        assert!(!s.hide_below);
        assert!(s.highlight_above);
        assert_eq!(s.threshold_bytes(), MIB as f64);
    }
}

use alloc::vec;
use alloc::vec::Vec;

use super::node::{Color, Dir, Link};
use super::raw_rbtree_map::RawRBTreeMap;
use crate::InvariantViolation;

/// Worklist entry for the bottom-up black-height pass.
enum Visit {
    /// First time we reach the link: check local properties and schedule the children.
    Enter(Link),
    /// Both children are done; their black-heights are on top of the result stack.
    Leave(Color),
}

impl<K: Ord, V> RawRBTreeMap<K, V> {
    /// Checks every Red-Black invariant plus link and length bookkeeping. O(n), no recursion.
    ///
    /// Never called from a mutating path.
    pub(crate) fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if let Some(root) = self.root() {
            let node = self.node(root);
            if node.is_red() {
                return Err(InvariantViolation::RedRoot);
            }
            if node.parent.is_some() {
                return Err(InvariantViolation::RootHasParent);
            }
        }

        let reachable = self.check_colors()?;
        if reachable != self.len() || self.allocated() != self.len() {
            return Err(InvariantViolation::LenMismatch);
        }

        self.check_order()
    }

    /// Red-red edges, black-heights and parent links. Returns the number of real nodes seen.
    fn check_colors(&self) -> Result<usize, InvariantViolation> {
        let mut seen = 0;
        // Black nodes from each finished subtree down to the sentinel, sentinel excluded.
        let mut heights: Vec<usize> = Vec::new();
        let mut work = vec![Visit::Enter(self.root())];

        while let Some(visit) = work.pop() {
            match visit {
                Visit::Enter(None) => heights.push(0),
                Visit::Enter(Some(h)) => {
                    seen += 1;
                    let node = self.node(h);
                    for child in [node.left(), node.right()].into_iter().flatten() {
                        let child_node = self.node(child);
                        if child_node.parent != Some(h) {
                            return Err(InvariantViolation::BrokenParentLink);
                        }
                        if node.is_red() && child_node.is_red() {
                            return Err(InvariantViolation::RedRedEdge);
                        }
                    }
                    work.push(Visit::Leave(node.color));
                    work.push(Visit::Enter(node.right()));
                    work.push(Visit::Enter(node.left()));
                }
                Visit::Leave(color) => {
                    let right = heights.pop().unwrap_or_default();
                    let left = heights.pop().unwrap_or_default();
                    if left != right {
                        return Err(InvariantViolation::BlackHeightMismatch);
                    }
                    heights.push(left + usize::from(color == Color::Black));
                }
            }
        }
        Ok(seen)
    }

    fn check_order(&self) -> Result<(), InvariantViolation> {
        let mut current = self.first();
        let mut previous: Option<&K> = None;
        while let Some(h) = current {
            let key = &self.node(h).key;
            if previous.is_some_and(|p| p >= key) {
                return Err(InvariantViolation::OutOfOrder);
            }
            previous = Some(key);
            current = self.step(h, Dir::Right);
        }
        Ok(())
    }

    pub(crate) fn is_valid(&self) -> bool {
        self.check_invariants().is_ok()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn tree_of(keys: &[u32]) -> RawRBTreeMap<u32, ()> {
        let mut tree = RawRBTreeMap::new();
        for &k in keys {
            tree.insert(k, ()).unwrap();
        }
        tree
    }

    #[test]
    fn empty_tree_is_valid() {
        let tree: RawRBTreeMap<u32, ()> = RawRBTreeMap::new();
        assert!(tree.is_valid());
    }

    #[test]
    fn detects_red_root() {
        let mut tree = tree_of(&[1]);
        let root = tree.root().unwrap();
        tree.node_mut(root).color = Color::Red;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRoot));
    }

    #[test]
    fn detects_red_red_edge() {
        // Recoloring the black root's children red and a grandchild red breaks property 2.
        let mut tree = tree_of(&[20, 10, 30, 5]);
        let root = tree.root().unwrap();
        let left = tree.node(root).left().unwrap();
        tree.node_mut(left).color = Color::Red;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::RedRedEdge));
    }

    #[test]
    fn detects_black_height_mismatch() {
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root().unwrap();
        let left = tree.node(root).left().unwrap();
        tree.node_mut(left).color = Color::Black;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::BlackHeightMismatch));
    }

    #[test]
    fn detects_broken_parent_link() {
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root().unwrap();
        let right = tree.node(root).right().unwrap();
        let left = tree.node(root).left();
        tree.node_mut(right).parent = left;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::BrokenParentLink));
    }

    #[test]
    fn detects_out_of_order_keys() {
        let mut tree = tree_of(&[2, 1, 3]);
        let root = tree.root().unwrap();
        let left = tree.node(root).left().unwrap();
        tree.node_mut(left).key = 9;
        assert_eq!(tree.check_invariants(), Err(InvariantViolation::OutOfOrder));
    }
}

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;
use core::iter::FusedIterator;

use super::RBTreeMap;
use crate::raw::{Handle, RawRBTreeMap};

/// An iterator visiting each node before its children, left subtree first.
///
/// This `struct` is created by the [`pre_order`](RBTreeMap::pre_order) method on [`RBTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PreOrder<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    stack: Vec<Handle>,
}

/// An iterator visiting each node after both of its children.
///
/// This `struct` is created by the [`post_order`](RBTreeMap::post_order) method on [`RBTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct PostOrder<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    /// `true` once the node's children have been scheduled.
    stack: Vec<(Handle, bool)>,
}

/// An iterator visiting the tree one depth at a time, each level from left to right.
///
/// This `struct` is created by the [`level_order`](RBTreeMap::level_order) method on [`RBTreeMap`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    queue: VecDeque<Handle>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Visits the entries in pre-order: node, left subtree, right subtree.
    ///
    /// The order reflects the current shape of the tree, which depends on the history of
    /// insertions and removals.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// let keys: Vec<_> = map.pre_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [20, 10, 30]);
    /// ```
    pub fn pre_order(&self) -> PreOrder<'_, K, V> {
        PreOrder {
            tree: &self.raw,
            stack: self.raw.root().into_iter().collect(),
        }
    }

    /// Visits the entries in post-order: left subtree, right subtree, node.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// let keys: Vec<_> = map.post_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys, [10, 30, 20]);
    /// ```
    pub fn post_order(&self) -> PostOrder<'_, K, V> {
        PostOrder {
            tree: &self.raw,
            stack: self.raw.root().map(|root| (root, false)).into_iter().collect(),
        }
    }

    /// Visits the entries breadth-first, starting at the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let map: RBTreeMap<_, _> = (1..=7).map(|k| (k, ())).collect();
    /// let keys: Vec<_> = map.level_order().map(|(k, _)| *k).collect();
    /// assert_eq!(keys[0], *map.pre_order().next().unwrap().0);
    /// assert_eq!(keys.len(), 7);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder {
            tree: &self.raw,
            queue: self.raw.root().into_iter().collect(),
        }
    }
}

impl<'a, K, V> Iterator for PreOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.stack.pop()?;
        let node = self.tree.node(h);
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for PreOrder<'_, K, V> {}

impl<'a, K, V> Iterator for PostOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (h, expanded) = self.stack.pop()?;
            let node = self.tree.node(h);
            if expanded {
                return Some((&node.key, &node.value));
            }
            self.stack.push((h, true));
            self.stack.extend(node.right().map(|r| (r, false)));
            self.stack.extend(node.left().map(|l| (l, false)));
        }
    }
}

impl<K, V> FusedIterator for PostOrder<'_, K, V> {}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let h = self.queue.pop_front()?;
        let node = self.tree.node(h);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some((&node.key, &node.value))
    }
}

impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}

impl<K, V> fmt::Debug for PreOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreOrder").field("pending", &self.stack.len()).finish()
    }
}

impl<K, V> fmt::Debug for PostOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostOrder").field("pending", &self.stack.len()).finish()
    }
}

impl<K, V> fmt::Debug for LevelOrder<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelOrder").field("pending", &self.queue.len()).finish()
    }
}

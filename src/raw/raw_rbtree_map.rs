use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Dir, Link, Node};
use crate::Error;

/// Source of tree identities, so a detached cursor can tell which tree it belongs to.
static NEXT_TREE_ID: AtomicUsize = AtomicUsize::new(0);

fn next_tree_id() -> usize {
    NEXT_TREE_ID.fetch_add(1, AtomicOrdering::Relaxed)
}

/// The core Red-Black Tree backing `RBTreeMap` and `RBTreeSet`.
pub(crate) struct RawRBTreeMap<K, V> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, or the sentinel if the tree is empty.
    root: Link,
    /// Number of real nodes.
    len: usize,
    /// Parent field of the sentinel. Only meaningful while a removal is rebalancing.
    nil_parent: Link,
    /// Identity of this tree instance.
    id: usize,
    /// Bumped by every structural modification.
    stamp: u64,
    /// Rotations performed so far.
    #[cfg(test)]
    rotations: usize,
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) fn new() -> Self {
        Self::with_arena(Arena::new())
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self::with_arena(Arena::with_capacity(capacity))
    }

    fn with_arena(nodes: Arena<Node<K, V>>) -> Self {
        Self {
            nodes,
            root: None,
            len: 0,
            nil_parent: None,
            id: next_tree_id(),
            stamp: 0,
            #[cfg(test)]
            rotations: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Number of occupied arena slots; equals `len` in a healthy tree.
    pub(crate) const fn allocated(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) const fn id(&self) -> usize {
        self.id
    }

    pub(crate) const fn stamp(&self) -> u64 {
        self.stamp
    }

    pub(crate) const fn root(&self) -> Link {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    /// Removes every node.
    pub(crate) fn clear(&mut self) {
        debug!("clearing red-black tree {} ({} nodes)", self.id, self.len);
        self.nodes.clear();
        self.root = None;
        self.len = 0;
        self.nil_parent = None;
        self.touch();
    }

    fn touch(&mut self) {
        self.stamp = self.stamp.wrapping_add(1);
    }

    /// Parent of `link`; for the sentinel this is whatever the last splice stored there.
    fn parent(&self, link: Link) -> Link {
        match link {
            Some(h) => self.node(h).parent,
            None => self.nil_parent,
        }
    }

    fn set_parent(&mut self, link: Link, parent: Link) {
        match link {
            Some(h) => self.node_mut(h).parent = parent,
            None => self.nil_parent = parent,
        }
    }

    fn color(&self, link: Link) -> Color {
        link.map_or(Color::Black, |h| self.node(h).color)
    }

    fn set_color(&mut self, link: Link, color: Color) {
        match link {
            Some(h) => self.node_mut(h).color = color,
            None => debug_assert_eq!(color, Color::Black, "`RawRBTreeMap::set_color()` - the sentinel is always black!"),
        }
    }

    /// Points whichever slot of `parent` held `old` at `new`; with no parent, `new` becomes the root.
    fn replace_child(&mut self, parent: Link, old: Handle, new: Link) {
        match parent {
            Some(p) => {
                let side = self.node(p).side_of(Some(old));
                self.node_mut(p).set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Rotates the subtree at `x` toward `dir`: the child on the opposite side takes `x`'s place
    /// and `x` becomes its `dir` child. In-order sequence and node count are unchanged.
    ///
    /// # Panics
    ///
    /// Panics if the promoted child is the sentinel.
    pub(crate) fn rotate(&mut self, x: Handle, dir: Dir) {
        let up = dir.opposite();
        let y = self
            .node(x)
            .child(up)
            .expect("`RawRBTreeMap::rotate()` - promoted child is the sentinel!");
        trace!("rotate {dir:?} at {x:?}, promoting {y:?}");
        #[cfg(test)]
        {
            self.rotations += 1;
        }

        let inner = self.node(y).child(dir);
        self.node_mut(x).set_child(up, inner);
        if let Some(b) = inner {
            self.node_mut(b).parent = Some(x);
        }

        let parent = self.node(x).parent;
        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.node_mut(y).set_child(dir, Some(x));
        self.node_mut(x).parent = Some(y);
    }

    /// Follows `dir` children from `from` until the sentinel.
    pub(crate) fn extreme(&self, from: Handle, dir: Dir) -> Handle {
        let mut current = from;
        while let Some(next) = self.node(current).child(dir) {
            current = next;
        }
        current
    }

    pub(crate) fn first(&self) -> Link {
        self.root.map(|root| self.extreme(root, Dir::Left))
    }

    pub(crate) fn last(&self) -> Link {
        self.root.map(|root| self.extreme(root, Dir::Right))
    }

    /// In-order neighbour of `handle`: the successor for `Dir::Right`, the predecessor for
    /// `Dir::Left`. Uses parent links only.
    pub(crate) fn step(&self, handle: Handle, dir: Dir) -> Link {
        let node = self.node(handle);
        if let Some(child) = node.child(dir) {
            return Some(self.extreme(child, dir.opposite()));
        }

        let mut current = handle;
        let mut parent = node.parent;
        while let Some(p) = parent {
            let up = self.node(p);
            if up.child(dir) != Some(current) {
                return Some(p);
            }
            current = p;
            parent = up.parent;
        }
        None
    }

    /// Height in nodes of the longest root-to-sentinel path.
    pub(crate) fn height(&self) -> usize {
        let mut deepest = 0;
        let mut stack: Vec<(Handle, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((handle, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = self.node(handle);
            for child in [node.left(), node.right()].into_iter().flatten() {
                stack.push((child, depth + 1));
            }
        }
        deepest
    }

    /// Black nodes below the root on any path down to the sentinel, counting the sentinel.
    pub(crate) fn black_height(&self) -> usize {
        let Some(root) = self.root else {
            return 0;
        };

        let mut height = 1;
        let mut current = self.node(root).left();
        while let Some(h) = current {
            let node = self.node(h);
            if !node.is_red() {
                height += 1;
            }
            current = node.left();
        }
        height
    }

    fn in_order_handles(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.len);
        let mut current = self.first();
        while let Some(h) = current {
            order.push(h);
            current = self.step(h, Dir::Right);
        }
        order
    }

    /// Every entry in ascending key order, with mutable access to the values.
    pub(crate) fn entries_mut(&mut self) -> Vec<(&K, &mut V)> {
        let order = self.in_order_handles();
        let mut by_slot: Vec<Option<(&K, &mut V)>> = self
            .nodes
            .slots_mut()
            .map(|slot| slot.map(|node| (&node.key, &mut node.value)))
            .collect();

        order
            .into_iter()
            .map(|h| {
                by_slot[h.to_index()]
                    .take()
                    .expect("`RawRBTreeMap::entries_mut()` - reachable handle points at a free slot!")
            })
            .collect()
    }

    /// Moves every entry out in ascending order, leaving the tree empty.
    /// Exchanges the entries stored at two distinct nodes, leaving links and colors in place.
    fn swap_entries(&mut self, a: Handle, b: Handle) {
        let (x, y) = self.nodes.get_pair_mut(a, b);
        core::mem::swap(&mut x.key, &mut y.key);
        core::mem::swap(&mut x.value, &mut y.value);
    }

    /// Removes the entry stored at `z` and rebalances.
    pub(crate) fn remove_handle(&mut self, z: Handle) -> (K, V) {
        let node = self.node(z);
        // A node with two real children trades entries with its successor, which has no left child.
        let y = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.extreme(right, Dir::Left);
                self.swap_entries(z, successor);
                successor
            }
            _ => z,
        };

        let spliced = self.node(y);
        let x = spliced.left().or(spliced.right());
        let parent = spliced.parent;
        let color = spliced.color;

        self.set_parent(x, parent);
        self.replace_child(parent, y, x);

        let removed = self.nodes.take(y);
        self.len -= 1;
        self.touch();

        if color == Color::Black {
            self.delete_fixup(x);
        }
        self.nil_parent = None;

        (removed.key, removed.value)
    }

    /// Restores the black-height along the path through `x`, which carries an extra black.
    fn delete_fixup(&mut self, mut x: Link) {
        while x != self.root && self.color(x) == Color::Black {
            let p = self
                .parent(x)
                .expect("`RawRBTreeMap::delete_fixup()` - non-root cursor without a parent!");
            let side = self.node(p).side_of(x);
            let away = side.opposite();
            let mut w = self.sibling(p, away);

            if self.node(w).is_red() {
                trace!("delete_fixup: red sibling {w:?}, rotating {side:?} at {p:?}");
                self.node_mut(w).color = Color::Black;
                self.node_mut(p).color = Color::Red;
                self.rotate(p, side);
                w = self.sibling(p, away);
            }

            let near = self.node(w).child(side);
            let far = self.node(w).child(away);
            if self.color(near) == Color::Black && self.color(far) == Color::Black {
                trace!("delete_fixup: black sibling {w:?} with black children, moving up");
                self.node_mut(w).color = Color::Red;
                x = Some(p);
                continue;
            }

            if self.color(far) == Color::Black {
                trace!("delete_fixup: red near nephew, rotating {away:?} at {w:?}");
                self.set_color(near, Color::Black);
                self.node_mut(w).color = Color::Red;
                self.rotate(w, away);
                w = self.sibling(p, away);
            }

            trace!("delete_fixup: red far nephew, rotating {side:?} at {p:?}");
            let far = self.node(w).child(away);
            let parent_color = self.node(p).color;
            self.node_mut(w).color = parent_color;
            self.node_mut(p).color = Color::Black;
            self.set_color(far, Color::Black);
            self.rotate(p, side);
            x = self.root;
        }
        self.set_color(x, Color::Black);
    }

    fn sibling(&self, parent: Handle, dir: Dir) -> Handle {
        self.node(parent)
            .child(dir)
            .expect("`RawRBTreeMap::delete_fixup()` - sibling of a doubly-black node is the sentinel!")
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_handle(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_handle(last))
    }

    pub(crate) fn first_key_value(&self) -> Option<(&K, &V)> {
        let node = self.node(self.first()?);
        Some((&node.key, &node.value))
    }

    pub(crate) fn last_key_value(&self) -> Option<(&K, &V)> {
        let node = self.node(self.last()?);
        Some((&node.key, &node.value))
    }

    /// Smallest entry, or [`Error::EmptyTree`].
    pub(crate) fn min_entry(&self) -> Result<(&K, &V), Error> {
        self.first_key_value().ok_or(Error::EmptyTree)
    }

    /// Largest entry, or [`Error::EmptyTree`].
    pub(crate) fn max_entry(&self) -> Result<(&K, &V), Error> {
        self.last_key_value().ok_or(Error::EmptyTree)
    }
}

impl<K: Ord, V> RawRBTreeMap<K, V> {
    /// Handle of the node holding `key`, if any.
    pub(crate) fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
                Ordering::Equal => return Some(h),
            };
        }
        None
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).map(|h| &self.node(h).value)
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let h = self.find(key)?;
        Some(&mut self.node_mut(h).value)
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.node(self.find(key)?);
        Some((&node.key, &node.value))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(key).is_some()
    }

    /// Nearest entry strictly beyond `key` in direction `dir` (`Right` = greater).
    /// `key` itself need not be present.
    pub(crate) fn nearest<Q>(&self, key: &Q, dir: Dir) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let beyond = match dir {
            Dir::Right => Ordering::Greater,
            Dir::Left => Ordering::Less,
        };

        let mut best = None;
        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            if node.key.borrow().cmp(key) == beyond {
                best = Some(h);
                current = node.child(dir.opposite());
            } else {
                current = node.child(dir);
            }
        }

        best.map(|h| {
            let node = self.node(h);
            (&node.key, &node.value)
        })
    }

    /// Key of the deepest node whose subtree holds both `a` and `b`.
    pub(crate) fn lowest_common_ancestor<Q>(&self, a: &Q, b: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.find(a)?;
        self.find(b)?;

        let mut current = self.root;
        while let Some(h) = current {
            let node = self.node(h);
            let key = node.key.borrow();
            current = if a < key && b < key {
                node.left()
            } else if a > key && b > key {
                node.right()
            } else {
                return Some(&node.key);
            };
        }
        None
    }

    /// Inserts a new entry, or fails with [`Error::DuplicateKey`] leaving the tree untouched.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<Handle, Error> {
        let mut parent = None;
        let mut dir = Dir::Left;
        let mut current = self.root;

        while let Some(h) = current {
            let node = self.node(h);
            dir = match key.cmp(&node.key) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return Err(Error::DuplicateKey),
            };
            parent = current;
            current = node.child(dir);
        }

        let z = self.nodes.alloc(Node::new(key, value, parent));
        match parent {
            Some(p) => self.node_mut(p).set_child(dir, Some(z)),
            None => self.root = Some(z),
        }
        self.len += 1;
        self.touch();

        self.insert_fixup(z);
        Ok(z)
    }

    /// Removes the entry for `key` if present.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let z = self.find(key)?;
        Some(self.remove_handle(z))
    }

    /// Removes red-red violations upward from the freshly inserted red node `z`.
    fn insert_fixup(&mut self, mut z: Handle) {
        while let Some(mut p) = self.node(z).parent {
            if !self.node(p).is_red() {
                break;
            }

            // The root is black, so a red parent always has a parent of its own.
            let g = self
                .node(p)
                .parent
                .expect("`RawRBTreeMap::insert_fixup()` - red node without a parent!");
            let side = self.node(g).side_of(Some(p));
            let uncle = self.node(g).child(side.opposite());

            if self.color(uncle) == Color::Red {
                trace!("insert_fixup: red uncle {uncle:?}, recoloring {g:?}");
                self.node_mut(p).color = Color::Black;
                self.set_color(uncle, Color::Black);
                self.node_mut(g).color = Color::Red;
                z = g;
                continue;
            }

            if self.node(p).side_of(Some(z)) != side {
                trace!("insert_fixup: inner child {z:?}, rotating {side:?} at {p:?}");
                self.rotate(p, side);
                z = p;
                p = self
                    .node(z)
                    .parent
                    .expect("`RawRBTreeMap::insert_fixup()` - rotation left the node without a parent!");
            }

            trace!("insert_fixup: outer child {z:?}, rotating {:?} at {g:?}", side.opposite());
            self.node_mut(p).color = Color::Black;
            self.node_mut(g).color = Color::Red;
            self.rotate(g, side.opposite());
            break;
        }

        if let Some(root) = self.root {
            self.node_mut(root).color = Color::Black;
        }
    }
}

impl<K: Clone, V: Clone> Clone for RawRBTreeMap<K, V> {
    /// Copies the arena slot-for-slot, so the clone has the same shape and colors.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
            nil_parent: None,
            id: next_tree_id(),
            stamp: 0,
            #[cfg(test)]
            rotations: 0,
        }
    }
}

use alloc::vec::Vec;

use super::RBTreeMap;
use crate::Error;
use crate::raw::{Dir, Handle, Link, RawRBTreeMap};

/// A detached in-order cursor over a [`RBTreeMap`].
///
/// Unlike [`Iter`](super::Iter) a cursor holds no borrow, so it can be stored alongside the map
/// and advanced later. It remembers which map created it and that map's modification stamp.
/// Once the map is changed by an insert, a removal or a clear, every call fails with
/// [`Error::IteratorInvalidated`] until [`reset`](Cursor::reset) is called.
///
/// Pending ancestors are kept on a heap-allocated stack, so the cursor never recurses.
///
/// # Examples
///
/// ```
/// use rbtree_arena::RBTreeMap;
///
/// let map = RBTreeMap::from([(2, 'b'), (1, 'a'), (3, 'c')]);
/// let mut cursor = map.cursor();
///
/// let mut seen = Vec::new();
/// while let Some((k, _)) = cursor.next(&map).unwrap() {
///     seen.push(*k);
/// }
/// assert_eq!(seen, [1, 2, 3]);
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    tree: usize,
    stamp: u64,
    stack: Vec<Handle>,
}

impl Cursor {
    pub(crate) fn new<K, V>(raw: &RawRBTreeMap<K, V>) -> Self {
        let mut cursor = Cursor {
            tree: raw.id(),
            stamp: raw.stamp(),
            stack: Vec::new(),
        };
        cursor.descend(raw, raw.root());
        cursor
    }

    /// Pushes `from` and its chain of left children.
    fn descend<K, V>(&mut self, raw: &RawRBTreeMap<K, V>, from: Link) {
        let mut current = from;
        while let Some(h) = current {
            self.stack.push(h);
            current = raw.node(h).child(Dir::Left);
        }
    }

    fn check<K, V>(&self, raw: &RawRBTreeMap<K, V>) -> Result<(), Error> {
        if self.tree == raw.id() && self.stamp == raw.stamp() {
            Ok(())
        } else {
            Err(Error::IteratorInvalidated)
        }
    }

    /// Returns `true` if the cursor can still be used with `map`.
    #[must_use]
    pub fn is_valid_for<K, V>(&self, map: &RBTreeMap<K, V>) -> bool {
        self.check(&map.raw).is_ok()
    }

    /// Advances the cursor and returns the next entry in ascending key order,
    /// or `None` once every entry has been visited.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IteratorInvalidated`] if `map` was modified since the cursor was
    /// created or last reset, or if `map` is not the map the cursor came from.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, K, V>(&mut self, map: &'a RBTreeMap<K, V>) -> Result<Option<(&'a K, &'a V)>, Error> {
        self.check(&map.raw)?;
        let Some(h) = self.stack.pop() else {
            return Ok(None);
        };
        let node = map.raw.node(h);
        self.descend(&map.raw, node.child(Dir::Right));
        Ok(Some((&node.key, &node.value)))
    }

    /// Returns the entry the next call to [`next`](Cursor::next) would yield, without advancing.
    ///
    /// # Errors
    ///
    /// Same as [`next`](Cursor::next).
    pub fn peek<'a, K, V>(&self, map: &'a RBTreeMap<K, V>) -> Result<Option<(&'a K, &'a V)>, Error> {
        self.check(&map.raw)?;
        Ok(self.stack.last().map(|&h| {
            let node = map.raw.node(h);
            (&node.key, &node.value)
        }))
    }

    /// Rewinds the cursor to the smallest key of `map` and binds it to `map`'s current state.
    pub fn reset<K, V>(&mut self, map: &RBTreeMap<K, V>) {
        self.tree = map.raw.id();
        self.stamp = map.raw.stamp();
        self.stack.clear();
        self.descend(&map.raw, map.raw.root());
    }
}

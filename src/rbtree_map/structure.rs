use core::borrow::Borrow;

use log::debug;

use super::RBTreeMap;
use crate::InvariantViolation;

impl<K, V> RBTreeMap<K, V> {
    /// Returns the number of nodes on the longest path from the root down to a leaf.
    ///
    /// An empty map has height 0. A Red-Black Tree with `n` entries never exceeds
    /// 2·log<sub>2</sub>(n + 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let map: RBTreeMap<u32, ()> = (0..1000).map(|k| (k, ())).collect();
    /// assert!(map.height() <= 2 * 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn height(&self) -> usize {
        self.raw.height()
    }

    /// Returns the number of black nodes on any path from the root down to the sentinel,
    /// excluding the root and counting the sentinel.
    ///
    /// An empty map has black-height 0; a single black root has black-height 1.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.raw.black_height()
    }
}

impl<K: Ord, V> RBTreeMap<K, V> {
    /// Checks every Red-Black invariant and reports the first one found broken.
    ///
    /// Besides the color rules this verifies parent links, strictly ascending keys and the
    /// recorded length. A correct map always returns `Ok(())`; this exists for tests and
    /// debugging and is never called by the map itself.
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] that was detected.
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.raw.check_invariants()
    }

    /// Returns `true` if [`check_invariants`](RBTreeMap::check_invariants) finds nothing wrong.
    ///
    /// An empty map is valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert!(map.is_valid());
    /// for k in [5, 3, 8, 1, 4] {
    ///     map.insert(k, ()).unwrap();
    ///     assert!(map.is_valid());
    /// }
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.raw.is_valid()
    }

    /// Returns the key of the deepest node whose subtree contains both `a` and `b`.
    ///
    /// A node counts as its own ancestor. Returns `None` if either key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.lowest_common_ancestor(&10, &30), Some(&20));
    /// assert_eq!(map.lowest_common_ancestor(&10, &10), Some(&10));
    /// assert_eq!(map.lowest_common_ancestor(&10, &99), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn lowest_common_ancestor<Q>(&self, a: &Q, b: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.lowest_common_ancestor(a, b)
    }
}

impl<K: Ord + Clone, V: Clone> RBTreeMap<K, V> {
    /// Returns a new map holding the entries of both maps.
    ///
    /// Where both maps contain a key, the entry from `self` is kept. Neither input is modified.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeMap;
    ///
    /// let a = RBTreeMap::from([(1, "a"), (2, "a")]);
    /// let b = RBTreeMap::from([(2, "b"), (3, "b")]);
    /// let merged = a.merge(&b);
    ///
    /// let entries: Vec<_> = merged.into_iter().collect();
    /// assert_eq!(entries, [(1, "a"), (2, "a"), (3, "b")]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n + m log(n + m))
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        let mut merged = self.clone();
        let before = merged.len();
        merged.extend(other.iter().map(|(k, v)| (k.clone(), v.clone())));
        debug!(
            "merged {} entries into a map of {} ({} keys already present)",
            other.len(),
            before,
            other.len() - (merged.len() - before)
        );
        merged
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn empty_map_shape() {
        let map: RBTreeMap<u8, ()> = RBTreeMap::new();
        assert_eq!(map.height(), 0);
        assert_eq!(map.black_height(), 0);
        assert!(map.is_valid());
    }

    #[test]
    fn single_node_shape() {
        let map = RBTreeMap::from([(1, ())]);
        assert_eq!(map.height(), 1);
        assert_eq!(map.black_height(), 1);
        assert_eq!(map.check_invariants(), Ok(()));
    }

    #[test]
    fn height_stays_logarithmic_for_sorted_input() {
        let map: RBTreeMap<u32, ()> = (0..4095).map(|k| (k, ())).collect();
        // 2 * log2(4096)
        assert!(map.height() <= 24, "height {}", map.height());
        assert!(map.black_height() >= map.height() / 2);
    }

    #[test]
    fn merge_prefers_self_and_leaves_inputs_alone() {
        let a: RBTreeMap<u32, char> = (0..50).map(|k| (k * 2, 'a')).collect();
        let b: RBTreeMap<u32, char> = (0..50).map(|k| (k * 3, 'b')).collect();
        let merged = a.merge(&b);

        assert!(merged.is_valid());
        assert_eq!(a.len(), 50);
        assert_eq!(b.len(), 50);
        for (k, v) in &merged {
            let expected = if a.contains_key(k) { 'a' } else { 'b' };
            assert_eq!(*v, expected, "key {k}");
        }
        let keys: Vec<u32> = merged.keys().copied().collect();
        let mut expected: Vec<u32> = (0..50).map(|k| k * 2).chain((0..50).map(|k| k * 3)).collect();
        expected.sort_unstable();
        expected.dedup();
        assert_eq!(keys, expected);
    }

    #[test]
    fn merge_with_empty() {
        let a = RBTreeMap::from([(1, 1)]);
        let empty = RBTreeMap::new();
        assert_eq!(a.merge(&empty), a);
        assert_eq!(empty.merge(&a), a);
    }
}

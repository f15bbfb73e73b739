use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::ops::BitOr;

use crate::rbtree_map::{self, IntoKeys, Keys};
use crate::{Error, InvariantViolation, RBTreeMap};

mod capacity;

/// An ordered set based on a Red-Black Tree.
///
/// See [`RBTreeMap`]'s documentation for the balancing guarantees. As with the map, inserting
/// a value that is already present is reported as [`Error::DuplicateKey`] rather than silently
/// ignored.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeSet` that observed the logic error and not result in undefined behavior.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use rbtree_arena::{Error, RBTreeSet};
///
/// let mut books = RBTreeSet::new();
///
/// books.insert("A Dance With Dragons").unwrap();
/// books.insert("To Kill a Mockingbird").unwrap();
/// books.insert("The Odyssey").unwrap();
/// assert_eq!(books.insert("The Odyssey"), Err(Error::DuplicateKey));
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.", books.len());
/// }
///
/// assert!(books.remove("The Odyssey"));
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `RBTreeSet` with a known list of items can be initialized from an array:
///
/// ```
/// use rbtree_arena::RBTreeSet;
///
/// let set = RBTreeSet::from([1, 2, 3]);
/// ```
pub struct RBTreeSet<T> {
    map: RBTreeMap<T, ()>,
}

/// An iterator over the items of a `RBTreeSet`.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeSet`].
///
/// # Examples
///
/// ```
/// use rbtree_arena::RBTreeSet;
///
/// let set = RBTreeSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// ```
///
/// [`iter`]: RBTreeSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: Keys<'a, T, ()>,
}

/// An owning iterator over the items of a `RBTreeSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: RBTreeSet#method.into_iter
pub struct IntoIter<T> {
    inner: IntoKeys<T, ()>,
}

/// A detached in-order cursor over a [`RBTreeSet`].
///
/// Behaves like the map's [`Cursor`](rbtree_map::Cursor): it holds no borrow and fails with
/// [`Error::IteratorInvalidated`] once the set is modified.
///
/// # Examples
///
/// ```
/// use rbtree_arena::{Error, RBTreeSet};
///
/// let mut set = RBTreeSet::from([1, 2]);
/// let mut cursor = set.cursor();
/// assert_eq!(cursor.next(&set), Ok(Some(&1)));
/// set.remove(&2);
/// assert_eq!(cursor.next(&set), Err(Error::IteratorInvalidated));
/// ```
#[derive(Clone, Debug)]
pub struct Cursor {
    inner: rbtree_map::Cursor,
}

impl<T> RBTreeSet<T> {
    /// Makes a new, empty `RBTreeSet`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let mut set: RBTreeSet<i32> = RBTreeSet::new();
    /// ```
    #[must_use]
    pub fn new() -> RBTreeSet<T> {
        RBTreeSet { map: RBTreeMap::new() }
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Returns the number of elements in the set.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns a reference to the first element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([2, 1]);
    /// assert_eq!(set.first(), Some(&1));
    /// assert_eq!(set.last(), Some(&2));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.map.first_key_value().map(|(k, ())| k)
    }

    /// Returns a reference to the last element in the set, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.map.last_key_value().map(|(k, ())| k)
    }

    /// Returns the smallest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the set is empty.
    pub fn min_value(&self) -> Result<&T, Error> {
        self.map.min_entry().map(|(k, ())| k)
    }

    /// Returns the largest element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTree`] if the set is empty.
    pub fn max_value(&self) -> Result<&T, Error> {
        self.map.max_entry().map(|(k, ())| k)
    }

    /// Removes the first element from the set and returns it, if any.
    pub fn pop_first(&mut self) -> Option<T> {
        self.map.pop_first().map(|(k, ())| k)
    }

    /// Removes the last element from the set and returns it, if any.
    pub fn pop_last(&mut self) -> Option<T> {
        self.map.pop_last().map(|(k, ())| k)
    }

    /// Gets an iterator that visits the elements in the `RBTreeSet` in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.map.keys() }
    }

    /// Creates a detached [`Cursor`] positioned before the smallest element.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            inner: self.map.cursor(),
        }
    }

    /// Returns the number of nodes on the longest root-to-leaf path (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Returns the black-height of the root. See [`RBTreeMap::black_height`].
    #[must_use]
    pub fn black_height(&self) -> usize {
        self.map.black_height()
    }
}

impl<T: Ord> RBTreeSet<T> {
    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.contains_key(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.get_key_value(value).map(|(k, ())| k)
    }

    /// Adds a value to the set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if an equal value is already present; the set is
    /// unchanged.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> Result<(), Error> {
        self.map.insert(value, ())
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let mut set = RBTreeSet::new();
    /// set.insert(2).unwrap();
    /// assert!(set.remove(&2));
    /// assert!(!set.remove(&2));
    /// ```
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to the value.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.remove_entry(value).map(|(k, ())| k)
    }

    /// Returns the smallest element strictly greater than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([10, 20, 30]);
    /// assert_eq!(set.successor(&20), Some(&30));
    /// assert_eq!(set.predecessor(&20), Some(&10));
    /// assert_eq!(set.predecessor(&10), None);
    /// ```
    pub fn successor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.successor(value).map(|(k, ())| k)
    }

    /// Returns the largest element strictly smaller than `value`.
    pub fn predecessor<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.map.predecessor(value).map(|(k, ())| k)
    }

    /// See [`RBTreeMap::check_invariants`].
    ///
    /// # Errors
    ///
    /// Returns the [`InvariantViolation`] that was detected.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        self.map.check_invariants()
    }

    /// Returns `true` if every Red-Black invariant holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.map.is_valid()
    }
}

impl<T: Ord + Clone> RBTreeSet<T> {
    /// Returns a new set holding every element of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2]);
    /// let b = RBTreeSet::from([2, 3]);
    /// let union: Vec<_> = a.union(&b).into_iter().collect();
    /// assert_eq!(union, [1, 2, 3]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &RBTreeSet<T>) -> RBTreeSet<T> {
        RBTreeSet {
            map: self.map.merge(&other.map),
        }
    }
}

impl Cursor {
    /// Advances the cursor and returns the next element in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IteratorInvalidated`] if `set` was modified since the cursor was created
    /// or last reset, or if it is a different set.
    #[allow(clippy::should_implement_trait)]
    pub fn next<'a, T>(&mut self, set: &'a RBTreeSet<T>) -> Result<Option<&'a T>, Error> {
        Ok(self.inner.next(&set.map)?.map(|(k, ())| k))
    }

    /// Returns the element the next call to [`next`](Cursor::next) would yield.
    ///
    /// # Errors
    ///
    /// Same as [`next`](Cursor::next).
    pub fn peek<'a, T>(&self, set: &'a RBTreeSet<T>) -> Result<Option<&'a T>, Error> {
        Ok(self.inner.peek(&set.map)?.map(|(k, ())| k))
    }

    /// Rewinds the cursor to the smallest element of `set`.
    pub fn reset<T>(&mut self, set: &RBTreeSet<T>) {
        self.inner.reset(&set.map);
    }

    /// Returns `true` if the cursor can still be used with `set`.
    #[must_use]
    pub fn is_valid_for<T>(&self, set: &RBTreeSet<T>) -> bool {
        self.inner.is_valid_for(&set.map)
    }
}

impl<T: Hash> Hash for RBTreeSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.map.hash(state);
    }
}

impl<T: PartialEq> PartialEq for RBTreeSet<T> {
    fn eq(&self, other: &RBTreeSet<T>) -> bool {
        self.map.eq(&other.map)
    }
}

impl<T: Eq> Eq for RBTreeSet<T> {}

impl<T: PartialOrd> PartialOrd for RBTreeSet<T> {
    fn partial_cmp(&self, other: &RBTreeSet<T>) -> Option<Ordering> {
        self.map.partial_cmp(&other.map)
    }
}

impl<T: Ord> Ord for RBTreeSet<T> {
    fn cmp(&self, other: &RBTreeSet<T>) -> Ordering {
        self.map.cmp(&other.map)
    }
}

impl<T: Clone> Clone for RBTreeSet<T> {
    fn clone(&self) -> Self {
        RBTreeSet { map: self.map.clone() }
    }
}

impl<T: fmt::Debug> fmt::Debug for RBTreeSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for RBTreeSet<T> {
    fn default() -> RBTreeSet<T> {
        RBTreeSet::new()
    }
}

impl<T: Ord> FromIterator<T> for RBTreeSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> RBTreeSet<T> {
        RBTreeSet {
            map: iter.into_iter().map(|k| (k, ())).collect(),
        }
    }
}

impl<T: Ord> Extend<T> for RBTreeSet<T> {
    /// Adds every value not yet present; duplicates are skipped.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for RBTreeSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord + Clone> BitOr<&RBTreeSet<T>> for &RBTreeSet<T> {
    type Output = RBTreeSet<T>;

    /// Returns the union of `self` and `rhs` as a new `RBTreeSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let a = RBTreeSet::from([1, 2, 3]);
    /// let b = RBTreeSet::from([3, 4, 5]);
    ///
    /// let result = &a | &b;
    /// assert_eq!(result, RBTreeSet::from([1, 2, 3, 4, 5]));
    /// ```
    fn bitor(self, rhs: &RBTreeSet<T>) -> RBTreeSet<T> {
        self.union(rhs)
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RBTreeSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for RBTreeSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `RBTreeSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_arena::RBTreeSet;
    ///
    /// let set = RBTreeSet::from([4, 3, 2, 1]);
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            inner: self.map.into_keys(),
        }
    }
}

impl<'a, T> IntoIterator for &'a RBTreeSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Iter").field(&self.inner).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner).finish()
    }
}

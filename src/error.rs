use core::fmt;

/// Errors reported by [`RBTreeMap`](crate::RBTreeMap) and [`RBTreeSet`](crate::RBTreeSet).
///
/// Every variant is recoverable; the operation that produced it left the tree unchanged.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// An insert found the key already present.
    DuplicateKey,
    /// A minimum or maximum was requested from an empty tree.
    EmptyTree,
    /// A [`Cursor`](crate::rbtree_map::Cursor) was used after the tree it came from was modified,
    /// or on a different tree.
    IteratorInvalidated,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => f.write_str("key is already present in the tree"),
            Error::EmptyTree => f.write_str("tree is empty"),
            Error::IteratorInvalidated => f.write_str("cursor was invalidated by a modification of the tree"),
        }
    }
}

impl core::error::Error for Error {}

/// A broken Red-Black Tree invariant, as found by
/// [`RBTreeMap::check_invariants`](crate::RBTreeMap::check_invariants).
///
/// Seeing one of these means the tree is corrupt; it never results from misuse of the API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum InvariantViolation {
    /// The root is red.
    RedRoot,
    /// The root has a parent link.
    RootHasParent,
    /// A red node has a red child.
    RedRedEdge,
    /// Two paths from the same node reach the sentinel through different numbers of black nodes.
    BlackHeightMismatch,
    /// A child does not point back at its parent.
    BrokenParentLink,
    /// The in-order key sequence is not strictly ascending.
    OutOfOrder,
    /// The recorded length disagrees with the number of reachable or allocated nodes.
    LenMismatch,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            InvariantViolation::RedRoot => "root is red",
            InvariantViolation::RootHasParent => "root has a parent",
            InvariantViolation::RedRedEdge => "red node has a red child",
            InvariantViolation::BlackHeightMismatch => "black-height differs between paths",
            InvariantViolation::BrokenParentLink => "child does not link back to its parent",
            InvariantViolation::OutOfOrder => "keys are not in strictly ascending order",
            InvariantViolation::LenMismatch => "recorded length does not match node count",
        };
        write!(f, "red-black invariant violated: {reason}")
    }
}

impl core::error::Error for InvariantViolation {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(Error::DuplicateKey.to_string(), "key is already present in the tree");
        assert_eq!(Error::EmptyTree.to_string(), "tree is empty");
        assert_eq!(
            InvariantViolation::RedRedEdge.to_string(),
            "red-black invariant violated: red node has a red child"
        );
    }
}

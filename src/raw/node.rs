use super::handle::Handle;

/// A link to a child or parent. `None` is the sentinel.
pub(crate) type Link = Option<Handle>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a node; also the direction of a rotation.
///
/// `rotate(x, Dir::Left)` is the classic left rotation: `x`'s right child is promoted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Dir {
    Left = 0,
    Right = 1,
}

impl Dir {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) color: Color,
    pub(crate) parent: Link,
    children: [Link; 2],
}

impl<K, V> Node<K, V> {
    /// A fresh red leaf hanging under `parent`.
    pub(crate) const fn new(key: K, value: V, parent: Link) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            children: [None, None],
        }
    }

    #[inline]
    pub(crate) const fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) {
        self.children[dir as usize] = child;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) const fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) const fn is_red(&self) -> bool {
        matches!(self.color, Color::Red)
    }

    /// Which side `child` hangs on. Also answers for the sentinel (`None`), which matches
    /// whichever slot is currently empty; the left slot is checked first.
    #[inline]
    pub(crate) fn side_of(&self, child: Link) -> Dir {
        if self.left() == child { Dir::Left } else { Dir::Right }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_nodes_are_red_leaves() {
        let node = Node::new(1, "a", None);
        assert!(node.is_red());
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.parent, None);
    }

    #[test]
    fn side_of_child() {
        let mut node = Node::new(1, (), None);
        let right = Handle::from_index(4);
        node.set_child(Dir::Right, Some(right));
        assert_eq!(node.side_of(Some(right)), Dir::Right);
        // The sentinel is found in the empty left slot.
        assert_eq!(node.side_of(None), Dir::Left);
    }

    #[test]
    fn opposite_is_an_involution() {
        assert_eq!(Dir::Left.opposite(), Dir::Right);
        assert_eq!(Dir::Left.opposite().opposite(), Dir::Left);
    }
}

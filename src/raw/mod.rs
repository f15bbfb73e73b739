mod arena;
mod handle;
mod node;
mod raw_rbtree_map;
mod validate;

pub(crate) use handle::Handle;
pub(crate) use node::{Dir, Link};
pub(crate) use raw_rbtree_map::RawRBTreeMap;

//! Arena-backed Red-Black Tree collections for Rust.
//!
//! This crate provides [`RBTreeMap`] and [`RBTreeSet`], ordered collections kept balanced by the
//! classic Red-Black rules. All nodes live in a single arena owned by the tree and refer to each
//! other through small integer handles, so parent links are plain indices and the whole crate is
//! free of `unsafe` code.
//!
//! # Example
//!
//! ```
//! use rbtree_arena::{Error, RBTreeMap};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100).unwrap();
//! scores.insert("Bob", 85).unwrap();
//! scores.insert("Carol", 92).unwrap();
//!
//! // Keys are unique: a second insert is rejected and leaves the map unchanged.
//! assert_eq!(scores.insert("Bob", 0), Err(Error::DuplicateKey));
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//!
//! // Neighbour queries do not require the key to be present.
//! assert_eq!(scores.successor(&"B"), Some((&"Bob", &85)));
//!
//! // A detached cursor notices later modifications.
//! let mut cursor = scores.cursor();
//! scores.remove(&"Alice");
//! assert_eq!(cursor.next(&scores), Err(Error::IteratorInvalidated));
//!
//! assert!(scores.is_valid());
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Bounded height** - At most 2·log<sub>2</sub>(n + 1), with at most two rotations per insert
//!   and three per removal
//! - **Typed failures** - Duplicate keys, empty trees and stale cursors are reported through
//!   [`Error`] instead of panics
//! - **Self-checking** - [`RBTreeMap::check_invariants`] verifies colors, black-heights, parent
//!   links and key order
//!
//! # Logging
//!
//! Rotations and rebalancing cases are reported at `trace` level and whole-tree events at `debug`
//! level through the [`log`] facade. No logger is installed by this crate.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod rbtree_map;
pub mod rbtree_set;

pub use error::{Error, InvariantViolation};
pub use rbtree_map::RBTreeMap;
pub use rbtree_set::RBTreeSet;

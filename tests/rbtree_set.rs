use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rbtree_arena::{Error, RBTreeSet};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates values in a range that ensures collisions.
fn value_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i64),
    Remove(i64),
    Contains(i64),
    Take(i64),
    First,
    Last,
    PopFirst,
    PopLast,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        5 => value_strategy().prop_map(SetOp::Insert),
        3 => value_strategy().prop_map(SetOp::Remove),
        2 => value_strategy().prop_map(SetOp::Contains),
        1 => value_strategy().prop_map(SetOp::Take),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
        1 => Just(SetOp::PopFirst),
        1 => Just(SetOp::PopLast),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both RBTreeSet and BTreeSet and asserts
    /// identical results and a valid tree at every step.
    #[test]
    fn set_ops_match_btreeset(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut rb_set: RBTreeSet<i64> = RBTreeSet::new();
        let mut bt_set: BTreeSet<i64> = BTreeSet::new();

        for op in &ops {
            match op {
                SetOp::Insert(v) => {
                    let expected = if bt_set.insert(*v) { Ok(()) } else { Err(Error::DuplicateKey) };
                    prop_assert_eq!(rb_set.insert(*v), expected, "insert({})", v);
                }
                SetOp::Remove(v) => {
                    prop_assert_eq!(rb_set.remove(v), bt_set.remove(v), "remove({})", v);
                }
                SetOp::Contains(v) => {
                    prop_assert_eq!(rb_set.contains(v), bt_set.contains(v), "contains({})", v);
                }
                SetOp::Take(v) => {
                    prop_assert_eq!(rb_set.take(v), bt_set.take(v), "take({})", v);
                }
                SetOp::First => {
                    prop_assert_eq!(rb_set.first(), bt_set.first());
                    prop_assert_eq!(rb_set.min_value().ok(), bt_set.first());
                }
                SetOp::Last => {
                    prop_assert_eq!(rb_set.last(), bt_set.last());
                    prop_assert_eq!(rb_set.max_value().ok(), bt_set.last());
                }
                SetOp::PopFirst => {
                    prop_assert_eq!(rb_set.pop_first(), bt_set.pop_first());
                }
                SetOp::PopLast => {
                    prop_assert_eq!(rb_set.pop_last(), bt_set.pop_last());
                }
            }
            prop_assert!(rb_set.is_valid(), "invariants broken after {:?}", op);
            prop_assert_eq!(rb_set.len(), bt_set.len(), "len mismatch after {:?}", op);
        }

        let rb_items: Vec<_> = rb_set.iter().copied().collect();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(rb_items, bt_items);
    }

    /// Iteration in both directions, by value and through a cursor.
    #[test]
    fn iter_matches_btreeset(values in proptest::collection::vec(value_strategy(), TEST_SIZE)) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        let rb_items: Vec<_> = rb_set.iter().copied().collect();
        let bt_items: Vec<_> = bt_set.iter().copied().collect();
        prop_assert_eq!(&rb_items, &bt_items);

        let rb_rev: Vec<_> = rb_set.iter().rev().copied().collect();
        let bt_rev: Vec<_> = bt_set.iter().rev().copied().collect();
        prop_assert_eq!(&rb_rev, &bt_rev);

        let mut cursor = rb_set.cursor();
        let mut walked = Vec::new();
        while let Some(v) = cursor.next(&rb_set).unwrap() {
            walked.push(*v);
        }
        prop_assert_eq!(&walked, &bt_items);

        let rb_owned: Vec<_> = rb_set.into_iter().collect();
        prop_assert_eq!(&rb_owned, &bt_items);
    }

    /// Neighbour queries match BTreeSet ranges.
    #[test]
    fn neighbours_match_btreeset(
        values in proptest::collection::vec(value_strategy(), 0..500),
        probes in proptest::collection::vec(value_strategy(), 50),
    ) {
        let rb_set: RBTreeSet<i64> = values.iter().copied().collect();
        let bt_set: BTreeSet<i64> = values.iter().copied().collect();

        for p in &probes {
            prop_assert_eq!(rb_set.successor(p), bt_set.range(p + 1..).next());
            prop_assert_eq!(rb_set.predecessor(p), bt_set.range(..*p).next_back());
            prop_assert_eq!(rb_set.get(p), bt_set.get(p));
        }
    }

    /// Union matches BTreeSet's union.
    #[test]
    fn union_matches_btreeset(
        a in proptest::collection::vec(value_strategy(), 0..500),
        b in proptest::collection::vec(value_strategy(), 0..500),
    ) {
        let rb_a: RBTreeSet<i64> = a.iter().copied().collect();
        let rb_b: RBTreeSet<i64> = b.iter().copied().collect();
        let bt_a: BTreeSet<i64> = a.iter().copied().collect();
        let bt_b: BTreeSet<i64> = b.iter().copied().collect();

        let union = &rb_a | &rb_b;
        prop_assert!(union.is_valid());
        let rb_items: Vec<_> = union.iter().copied().collect();
        let bt_items: Vec<_> = bt_a.union(&bt_b).copied().collect();
        prop_assert_eq!(rb_items, bt_items);
        prop_assert_eq!(rb_a.union(&rb_b), union);
    }

    /// Eq and Ord agree with BTreeSet.
    #[test]
    fn comparisons_match_btreeset(
        a in proptest::collection::vec(0i64..20, 0..15),
        b in proptest::collection::vec(0i64..20, 0..15),
    ) {
        let rb_a: RBTreeSet<i64> = a.iter().copied().collect();
        let rb_b: RBTreeSet<i64> = b.iter().copied().collect();
        let bt_a: BTreeSet<i64> = a.iter().copied().collect();
        let bt_b: BTreeSet<i64> = b.iter().copied().collect();

        prop_assert_eq!(rb_a == rb_b, bt_a == bt_b);
        prop_assert_eq!(rb_a.cmp(&rb_b), bt_a.cmp(&bt_b));
        prop_assert_eq!(rb_a.clone(), rb_a);
    }
}

#[test]
fn duplicate_insert_leaves_set_unchanged() {
    let mut set = RBTreeSet::from([10, 20, 30]);
    assert_eq!(set.insert(20), Err(Error::DuplicateKey));
    assert_eq!(set.len(), 3);
    assert_eq!(set.height(), 2);
    assert_eq!(set.black_height(), 1);
    assert_eq!(set.check_invariants(), Ok(()));
}

#[test]
fn empty_set_reports_empty_tree() {
    let mut set = RBTreeSet::from([5]);
    assert!(set.remove(&5));
    assert!(!set.remove(&5));
    assert_eq!(set.min_value(), Err(Error::EmptyTree));
    assert_eq!(set.max_value(), Err(Error::EmptyTree));
    assert_eq!(set.height(), 0);
}

#[test]
fn cursor_rejects_modified_set() {
    let mut set: RBTreeSet<i64> = (0..5).collect();
    let mut cursor = set.cursor();
    assert_eq!(cursor.next(&set), Ok(Some(&0)));
    assert_eq!(set.pop_last(), Some(4));
    assert_eq!(cursor.next(&set), Err(Error::IteratorInvalidated));
}

#[test]
fn debug_output_lists_items() {
    let set = RBTreeSet::from([3, 1, 2]);
    assert_eq!(format!("{set:?}"), "{1, 2, 3}");
}

#[test]
fn with_capacity_reserves_room() {
    let mut set = RBTreeSet::with_capacity(64);
    let capacity = set.capacity();
    assert!(capacity >= 64);
    set.extend(0..64);
    assert_eq!(set.capacity(), capacity);
}

use std::collections::VecDeque;

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use treapless::LinkedList;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

#[derive(Debug, Clone)]
enum ListOp {
    PushFront(i64),
    PushBack(i64),
    PopFront,
    PopBack,
    Insert(usize, i64),
    Remove(usize),
    Get(usize),
    Set(usize, i64),
}

fn list_op_strategy() -> impl Strategy<Value = ListOp> {
    let value = -100i64..100i64;
    prop_oneof![
        3 => value.clone().prop_map(ListOp::PushFront),
        3 => value.clone().prop_map(ListOp::PushBack),
        2 => Just(ListOp::PopFront),
        2 => Just(ListOp::PopBack),
        2 => (0usize..TEST_SIZE, value.clone()).prop_map(|(i, v)| ListOp::Insert(i, v)),
        2 => (0usize..TEST_SIZE).prop_map(ListOp::Remove),
        2 => (0usize..TEST_SIZE).prop_map(ListOp::Get),
        1 => (0usize..TEST_SIZE, value).prop_map(|(i, v)| ListOp::Set(i, v)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random operation sequence on both LinkedList and VecDeque,
    /// clamping indices into range, and asserts identical results at every
    /// step. Node recycling through the arena free list is exercised by the
    /// push/pop churn.
    #[test]
    fn list_ops_match_vecdeque(ops in proptest::collection::vec(list_op_strategy(), TEST_SIZE)) {
        let mut list: LinkedList<i64> = LinkedList::new();
        let mut model: VecDeque<i64> = VecDeque::new();

        for op in &ops {
            match op {
                ListOp::PushFront(v) => {
                    list.push_front(*v);
                    model.push_front(*v);
                }
                ListOp::PushBack(v) => {
                    list.push_back(*v);
                    model.push_back(*v);
                }
                ListOp::PopFront => {
                    prop_assert_eq!(list.pop_front(), model.pop_front());
                }
                ListOp::PopBack => {
                    prop_assert_eq!(list.pop_back(), model.pop_back());
                }
                ListOp::Insert(i, v) => {
                    let i = i % (model.len() + 1);
                    list.insert(i, *v);
                    model.insert(i, *v);
                }
                ListOp::Remove(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        prop_assert_eq!(list.remove(i), model.remove(i).unwrap());
                    }
                }
                ListOp::Get(i) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        prop_assert_eq!(list.get(i), model.get(i));
                    }
                }
                ListOp::Set(i, v) => {
                    if !model.is_empty() {
                        let i = i % model.len();
                        prop_assert_eq!(list.set(i, *v), std::mem::replace(&mut model[i], *v));
                    }
                }
            }
            prop_assert_eq!(list.len(), model.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(list.front(), model.front(), "front mismatch after {:?}", op);
            prop_assert_eq!(list.back(), model.back(), "back mismatch after {:?}", op);
        }

        // Forward and reverse traversal both reflect the final chain.
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), Vec::from(model.clone()));
        let mut reversed: Vec<_> = list.iter().rev().copied().collect();
        reversed.reverse();
        prop_assert_eq!(reversed, Vec::from(model));
    }

    /// remove_range excises exactly `first..=last` and both lists keep
    /// consistent links afterwards.
    #[test]
    fn remove_range_matches_drain(
        values in proptest::collection::vec(-100i64..100, 1..200),
        bounds in (0usize..200, 0usize..200),
    ) {
        let mut list: LinkedList<i64> = values.iter().copied().collect();
        let mut model: Vec<i64> = values;

        let first = bounds.0 % model.len();
        let last = first + bounds.1 % (model.len() - first);

        let segment = list.remove_range(first, last);
        let drained: Vec<i64> = model.drain(first..=last).collect();

        prop_assert_eq!(segment.iter().copied().collect::<Vec<_>>(), drained);
        prop_assert_eq!(list.iter().copied().collect::<Vec<_>>(), model.clone());
        prop_assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), {
            let mut rev = model;
            rev.reverse();
            rev
        });
    }
}

// ─── Cursor behavior ─────────────────────────────────────────────────────────

#[test]
fn cursor_alternates_like_a_list_iterator() {
    let list: LinkedList<i32> = (10..15).collect();
    let mut cursor = list.cursor_at(2);

    // next and prev return the same element when alternated.
    assert_eq!(cursor.next(), Some(&12));
    assert_eq!(cursor.prev(), Some(&12));
    assert_eq!(cursor.prev(), Some(&11));
    assert_eq!(cursor.next(), Some(&11));
    assert_eq!(cursor.index(), 2);
}

#[test]
fn cursor_walks_the_full_list_from_either_end() {
    let list: LinkedList<i32> = (0..5).collect();

    let mut cursor = list.cursor_at(0);
    let forward: Vec<_> = std::iter::from_fn(|| cursor.next().copied()).collect();
    assert_eq!(forward, [0, 1, 2, 3, 4]);
    assert_eq!(cursor.next(), None);

    let mut cursor = list.cursor_at(list.len());
    let backward: Vec<_> = std::iter::from_fn(|| cursor.prev().copied()).collect();
    assert_eq!(backward, [4, 3, 2, 1, 0]);
    assert_eq!(cursor.prev(), None);
}

#[test]
fn index_of_finds_the_first_occurrence() {
    let list: LinkedList<i32> = [5, 3, 7, 3].into_iter().collect();

    assert_eq!(list.index_of(&3), Some(1));
    assert_eq!(list.index_of(&9), None);
}

#[test]
fn cleared_list_is_reusable() {
    let mut list: LinkedList<i32> = (0..10).collect();
    list.clear();

    assert!(list.is_empty());
    assert_eq!(list.pop_back(), None);

    list.push_back(1);
    list.push_front(0);
    assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1]);
}

#[test]
#[should_panic(expected = "out of range")]
fn cursor_past_the_end_panics() {
    let list: LinkedList<i32> = (0..3).collect();
    let _ = list.cursor_at(4);
}

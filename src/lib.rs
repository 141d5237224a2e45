//! Mutable container engines for Rust, built around a randomized
//! order-statistics search tree.
//!
//! This crate provides four peer engines:
//!
//! - [`RandTree`] - an ordered multiset balanced by randomization alone:
//!   split-based root insertion with probability 1/(s+1) and size-weighted
//!   randomized join removal, with O(log n) expected
//!   [`get_by_rank`](RandTree::get_by_rank) / [`rank_of`](RandTree::rank_of)
//!   and indexing by [`Rank`]
//! - [`DynArray`] - contiguous storage with an explicit grow/shrink
//!   capacity policy
//! - [`LinkedList`] - a doubly linked chain with O(1) end mutation and
//!   nearer-end positional access
//! - [`HashTable`] - separate chaining with load-factor-driven resizing
//!   and a collision probe counter
//!
//! # Example
//!
//! ```
//! use treapless::{RandTree, Rank};
//!
//! let mut scores = RandTree::new();
//! scores.insert(100);
//! scores.insert(85);
//! scores.insert(92);
//!
//! // Ordered-set operations work as expected.
//! assert!(scores.contains(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (expected O(log n)).
//! assert_eq!(scores.get_by_rank(1), Some(&92));
//! assert_eq!(scores.rank_of(&100), Some(2));
//! assert_eq!(scores[Rank(0)], 85);
//! ```
//!
//! # Features
//!
//! - **Randomized balancing** - the tree stores no balance metadata; shape
//!   distribution comes from coin flips at insertion and removal, and the
//!   RNG is seedable for reproducible shapes
//! - **Exact subtree sizes** - every node's size is maintained through
//!   every mutation, so rank queries never traverse the full tree
//! - **Pluggable ordering** - [`Comparator`] decouples element ordering
//!   from the element type; [`NaturalOrder`] covers `T: Ord`
//! - **Parent-free nodes** - iterators and cursors carry explicit
//!   root-to-node stacks instead of parent pointers
//!
//! # Implementation
//!
//! Tree and list nodes live in slot arenas addressed by niche-packed
//! 32-bit handles, so node links cost half a pointer and the borrow
//! checker rules out structural mutation while any iterator or cursor is
//! live.

// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

mod comparator;
mod order_statistic;
mod raw;

pub mod dyn_array;
pub mod hash_table;
pub mod linked_list;
pub mod rand_tree;

pub use comparator::{Comparator, FnComparator, NaturalOrder};
pub use dyn_array::DynArray;
pub use hash_table::HashTable;
pub use linked_list::LinkedList;
pub use order_statistic::Rank;
pub use rand_tree::RandTree;

use core::fmt;
use core::iter::FusedIterator;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::comparator::{Comparator, NaturalOrder};
use crate::raw::{RawRandTree, Spine};

mod order_statistic;

/// An ordered collection backed by a randomized order-statistic search tree.
///
/// The tree keeps itself balanced probabilistically instead of through
/// rotations driven by stored metadata: insertion installs the new element at
/// a visited position with probability 1/(s+1) (splitting the subtree there),
/// and removal rejoins orphaned subtrees with a size-weighted coin flip. The
/// result is expected O(log n) height without height, color, or priority
/// fields on the nodes. Every node does carry its exact subtree size, which
/// buys O(log n) rank queries: [`get_by_rank`](RandTree::get_by_rank),
/// [`rank_of`](RandTree::rank_of), and indexing by [`Rank`](crate::Rank).
///
/// The ordering policy is a [`Comparator`] fixed at construction (defaulting
/// to the element's [`Ord`]), along with a duplicates-allowed flag: a tree
/// built with duplicates disallowed behaves like a sorted set, one with
/// duplicates allowed behaves like a sorted bag. The random source is an
/// injected [`SmallRng`]; seed it for reproducible shapes in tests.
///
/// It is a logic error for an element to be modified in such a way that its
/// ordering under the tree's comparator changes while it is stored. The
/// behavior of such a logic error is unspecified but memory-safe.
///
/// # Examples
///
/// ```
/// use treapless::RandTree;
///
/// let mut tree = RandTree::new();
///
/// assert!(tree.insert(3));
/// assert!(tree.insert(1));
/// assert!(tree.insert(2));
/// assert!(!tree.insert(2)); // duplicates are disallowed by default
///
/// assert!(tree.contains(&2));
/// let ascending: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(ascending, [1, 2, 3]);
/// ```
pub struct RandTree<T, C = NaturalOrder> {
    raw: RawRandTree<T>,
    comparator: C,
    duplicates: bool,
    rng: SmallRng,
}

/// An iterator over a [`RandTree`] in ascending order.
///
/// Created by [`RandTree::iter`]. Double-ended, so `.rev()` yields the
/// descending order.
///
/// # Examples
///
/// ```
/// use treapless::RandTree;
///
/// let tree: RandTree<i32> = [2, 1, 3].into_iter().collect();
/// let mut iter = tree.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    raw: &'a RawRandTree<T>,
    // Explicit spine stacks stand in for the parent pointers the nodes
    // deliberately do not have.
    forward: Spine,
    backward: Spine,
    remaining: usize,
}

/// An owning iterator over a [`RandTree`] in ascending order.
///
/// Created by [`RandTree::into_iter`].
pub struct IntoIter<T> {
    inner: std::vec::IntoIter<T>,
}

/// A bidirectional cursor over a [`RandTree`], positionable at any rank.
///
/// The cursor sits between elements: [`next`](Cursor::next) yields the
/// element at the current rank and moves forward, [`prev`](Cursor::prev)
/// yields the element just before the current rank and moves backward, each
/// in amortized O(1) once positioned. Creation at rank `r` costs one
/// order-statistic descent.
///
/// # Examples
///
/// ```
/// use treapless::RandTree;
///
/// let tree: RandTree<i32> = (0..10).collect();
/// let mut cursor = tree.cursor_at(5);
///
/// assert_eq!(cursor.next(), Some(&5));
/// assert_eq!(cursor.next(), Some(&6));
/// assert_eq!(cursor.prev(), Some(&6));
/// assert_eq!(cursor.prev(), Some(&5));
/// assert_eq!(cursor.prev(), Some(&4));
/// ```
pub struct Cursor<'a, T: 'a> {
    raw: &'a RawRandTree<T>,
    // Root-to-current path; empty means the end position (rank == len).
    path: Spine,
    rank: usize,
}

impl<T> RandTree<T, NaturalOrder> {
    /// Creates an empty tree ordered by [`Ord`], with duplicates disallowed
    /// and an entropy-seeded random source.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::RandTree;
    ///
    /// let tree: RandTree<i32> = RandTree::new();
    /// assert!(tree.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            raw: RawRandTree::new(),
            comparator: NaturalOrder,
            duplicates: false,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an empty tree like [`new`](RandTree::new) but with a fixed
    /// seed, so the sequence of structural coin flips (and therefore the
    /// exact tree shape) is reproducible.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::RandTree;
    ///
    /// let mut a = RandTree::with_seed(42);
    /// let mut b = RandTree::with_seed(42);
    /// for v in [5, 1, 4, 2, 3] {
    ///     a.insert(v);
    ///     b.insert(v);
    /// }
    /// assert_eq!(a, b);
    /// ```
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            raw: RawRandTree::new(),
            comparator: NaturalOrder,
            duplicates: false,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl<T, C> RandTree<T, C> {
    /// Creates an empty tree with an explicit comparator and duplicates
    /// policy, both fixed for the tree's lifetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::{NaturalOrder, RandTree};
    ///
    /// let mut bag = RandTree::with_options(NaturalOrder, true);
    /// assert!(bag.insert(7));
    /// assert!(bag.insert(7)); // duplicates allowed
    /// assert_eq!(bag.len(), 2);
    /// ```
    #[must_use]
    pub fn with_options(comparator: C, duplicates: bool) -> Self {
        Self {
            raw: RawRandTree::new(),
            comparator,
            duplicates,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates an empty tree with an explicit comparator, duplicates policy,
    /// and seed.
    #[must_use]
    pub fn with_options_seeded(comparator: C, duplicates: bool, seed: u64) -> Self {
        Self {
            raw: RawRandTree::new(),
            comparator,
            duplicates,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns the number of elements in the tree.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns `true` if this tree was constructed to accept duplicates.
    #[must_use]
    pub const fn allows_duplicates(&self) -> bool {
        self.duplicates
    }

    /// Removes all elements, keeping the node storage for reuse.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns an ascending iterator over the tree.
    pub fn iter(&self) -> Iter<'_, T> {
        let mut forward = SmallVec::new();
        let mut backward = SmallVec::new();
        self.raw.push_left_spine(self.raw.root(), &mut forward);
        self.raw.push_right_spine(self.raw.root(), &mut backward);

        Iter {
            raw: &self.raw,
            forward,
            backward,
            remaining: self.raw.len(),
        }
    }

    /// Returns a bidirectional cursor positioned at `rank`, built by a
    /// single order-statistic descent. `rank == len()` is the end position,
    /// from which only [`prev`](Cursor::prev) makes progress.
    ///
    /// # Panics
    ///
    /// Panics if `rank > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::RandTree;
    ///
    /// let tree: RandTree<i32> = (0..5).collect();
    /// let mut cursor = tree.cursor_at(tree.len());
    ///
    /// assert_eq!(cursor.next(), None);
    /// assert_eq!(cursor.prev(), Some(&4));
    /// ```
    #[must_use]
    pub fn cursor_at(&self, rank: usize) -> Cursor<'_, T> {
        assert!(rank <= self.raw.len(), "`RandTree::cursor_at()` - `rank` is out of range!");

        let path = if rank == self.raw.len() {
            SmallVec::new()
        } else {
            self.raw.path_to_rank(rank)
        };

        Cursor {
            raw: &self.raw,
            path,
            rank,
        }
    }

    /// Returns the smallest element, or `None` if the tree is empty.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.get_by_rank(0)
    }

    /// Returns the largest element, or `None` if the tree is empty.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.get_by_rank(self.len().checked_sub(1)?)
    }
}

impl<T, C: Comparator<T>> RandTree<T, C> {
    /// Inserts `value` into the tree.
    ///
    /// Returns `false` without modifying the tree when duplicates are
    /// disallowed and an equal element is already present; otherwise the
    /// element is installed by randomized root insertion and `true` is
    /// returned.
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::RandTree;
    ///
    /// let mut tree = RandTree::new();
    /// assert!(tree.insert(10));
    /// assert!(!tree.insert(10));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        if !self.duplicates && self.raw.find(&self.comparator, &value).is_some() {
            return false;
        }
        self.raw.insert(&self.comparator, &mut self.rng, value);
        true
    }

    /// Returns `true` if an element equal to `value` under the tree's
    /// comparator is present.
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.find(&self.comparator, value).is_some()
    }

    /// Removes one element equal to `value`, if any. When duplicates are
    /// allowed and several are present, the instance found first in descent
    /// order is removed; the rest stay discoverable.
    ///
    /// Returns `false` and leaves the tree unchanged if no equal element is
    /// present.
    ///
    /// # Complexity
    ///
    /// Expected O(log n).
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::{NaturalOrder, RandTree};
    ///
    /// let mut bag = RandTree::with_options(NaturalOrder, true);
    /// bag.insert(7);
    /// bag.insert(7);
    ///
    /// assert!(bag.remove(&7));
    /// assert!(bag.contains(&7));
    /// assert_eq!(bag.len(), 1);
    /// assert!(!bag.remove(&8));
    /// ```
    pub fn remove(&mut self, value: &T) -> bool {
        self.raw.remove(&self.comparator, &mut self.rng, value).is_some()
    }
}

impl<T: Clone, C: Clone> Clone for RandTree<T, C> {
    /// Produces an independent structural copy; subsequent mutation of
    /// either tree does not affect the other.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
            duplicates: self.duplicates,
            rng: self.rng.clone(),
        }
    }
}

impl<T> Default for RandTree<T, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for RandTree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Structural equality: same length and equal elements in sorted order.
impl<T: PartialEq, C> PartialEq for RandTree<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq, C> Eq for RandTree<T, C> {}

impl<T: Ord> FromIterator<T> for RandTree<T, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T, C: Comparator<T>> Extend<T> for RandTree<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for RandTree<T, NaturalOrder> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a RandTree<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T, C> IntoIterator for RandTree<T, C> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Consumes the tree into an ascending sequence of its elements.
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.forward.pop()?;
        let node = self.raw.node(handle);
        self.raw.push_left_spine(node.right(), &mut self.forward);
        self.remaining -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.backward.pop()?;
        let node = self.raw.node(handle);
        self.raw.push_right_spine(node.left(), &mut self.backward);
        self.remaining -= 1;
        Some(node.element())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw,
            forward: self.forward.clone(),
            backward: self.backward.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
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
        f.debug_struct("IntoIter").field("remaining", &self.inner.len()).finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the rank of the cursor's current position, in `0..=len`.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Yields the element at the current rank and steps forward, or `None`
    /// at the end position.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a T> {
        let &handle = self.path.last()?;
        let element = self.raw.node(handle).element();
        self.raw.advance_path(&mut self.path);
        self.rank += 1;
        Some(element)
    }

    /// Yields the element just before the current rank and steps backward,
    /// or `None` at the start position.
    pub fn prev(&mut self) -> Option<&'a T> {
        if self.rank == 0 {
            return None;
        }
        self.raw.retreat_path(&mut self.path);
        self.rank -= 1;
        let &handle = self.path.last().expect("`Cursor::prev()` - path cannot be empty after stepping back!");
        Some(self.raw.node(handle).element())
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("rank", &self.rank).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rank;

    fn seeded(values: &[i64]) -> RandTree<i64> {
        let mut tree = RandTree::with_seed(0xCAFE);
        for &v in values {
            tree.insert(v);
        }
        tree
    }

    #[test]
    fn duplicate_insert_is_a_no_op() {
        let mut tree = seeded(&[1, 2, 3]);
        assert!(!tree.insert(2));
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn iter_is_double_ended_and_fused() {
        let tree = seeded(&[4, 2, 6, 1, 3, 5, 7]);
        let mut iter = tree.iter();

        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.len(), 5);

        let middle: Vec<_> = iter.by_ref().copied().collect();
        assert_eq!(middle, [2, 3, 4, 5, 6]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn cursor_alternates_like_a_list_iterator() {
        let tree = seeded(&[10, 20, 30]);
        let mut cursor = tree.cursor_at(1);

        assert_eq!(cursor.next(), Some(&20));
        assert_eq!(cursor.prev(), Some(&20));
        assert_eq!(cursor.prev(), Some(&10));
        assert_eq!(cursor.prev(), None);
        assert_eq!(cursor.rank(), 0);
    }

    #[test]
    #[should_panic(expected = "`RandTree::cursor_at()` - `rank` is out of range!")]
    fn cursor_beyond_end_panics() {
        let tree = seeded(&[1]);
        let _ = tree.cursor_at(2);
    }

    #[test]
    fn clone_is_independent() {
        let mut original = seeded(&[1, 2, 3]);
        let mut copy = original.clone();

        original.remove(&2);
        copy.insert(4);

        assert_eq!(original.iter().copied().collect::<Vec<_>>(), [1, 3]);
        assert_eq!(copy.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    }

    #[test]
    fn rank_indexing() {
        let tree = seeded(&[30, 10, 20]);
        assert_eq!(tree[Rank(0)], 10);
        assert_eq!(tree[Rank(1)], 20);
        assert_eq!(tree[Rank(2)], 30);
    }

    #[test]
    fn into_iter_is_sorted() {
        let tree = seeded(&[9, 1, 8, 2, 7, 3]);
        let values: Vec<_> = tree.into_iter().collect();
        assert_eq!(values, [1, 2, 3, 7, 8, 9]);
    }
}

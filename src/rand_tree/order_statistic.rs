use core::ops::Index;

use crate::Rank;
use crate::comparator::Comparator;

use super::RandTree;

impl<T, C> RandTree<T, C> {
    /// Returns the element at zero-based `rank` in sorted order, or `None`
    /// if `rank` is out of range.
    ///
    /// The descent compares `rank` against left-subtree sizes, so no
    /// traversal of the intervening elements happens.
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
    /// let tree: RandTree<i32> = [50, 10, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.get_by_rank(1), Some(&30));
    /// assert_eq!(tree.get_by_rank(3), None);
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.node(handle).element())
    }
}

impl<T, C: Comparator<T>> RandTree<T, C> {
    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// no equal element is present. With duplicates allowed, the rank of the
    /// instance found first in descent order is returned.
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
    /// let tree: RandTree<i32> = [50, 10, 30].into_iter().collect();
    ///
    /// assert_eq!(tree.rank_of(&50), Some(2));
    /// assert_eq!(tree.rank_of(&40), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.raw.rank_of(&self.comparator, value)
    }
}

/// Indexes into the tree by rank.
///
/// # Panics
///
/// Panics if `rank` is out of range.
///
/// # Examples
///
/// ```
/// use treapless::{RandTree, Rank};
///
/// let tree: RandTree<&str> = ["pear", "apple"].into_iter().collect();
/// assert_eq!(tree[Rank(0)], "apple");
/// ```
impl<T, C> Index<Rank> for RandTree<T, C> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("rank out of bounds")
    }
}

use core::cmp::Ordering;

/// Total-order policy for a [`RandTree`](crate::RandTree).
///
/// The comparator is fixed when the tree is constructed; it is a logic error
/// for it to answer inconsistently for the same pair of values while they are
/// stored in the tree.
///
/// # Examples
///
/// ```
/// use treapless::{Comparator, FnComparator, RandTree};
///
/// // Order strings by length instead of lexicographically.
/// let by_len = FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
/// let mut tree = RandTree::with_options(by_len, false);
///
/// tree.insert("kiwi");
/// tree.insert("fig");
/// tree.insert("banana");
///
/// let ordered: Vec<_> = tree.iter().copied().collect();
/// assert_eq!(ordered, ["fig", "kiwi", "banana"]);
/// ```
pub trait Comparator<T> {
    /// Returns the ordering of `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The default comparator: the element type's own [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

/// Adapts a closure into a [`Comparator`].
#[derive(Clone, Copy, Debug)]
pub struct FnComparator<F>(pub F);

impl<T, F: Fn(&T, &T) -> Ordering> Comparator<T> for FnComparator<F> {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.0)(a, b)
    }
}

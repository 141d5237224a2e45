/// A zero-based position in the sorted order of a [`RandTree`](crate::RandTree).
///
/// # Examples
///
/// ```
/// use treapless::{RandTree, Rank};
///
/// let tree: RandTree<i32> = [30, 10, 20].into_iter().collect();
///
/// assert_eq!(tree[Rank(0)], 10);
/// assert_eq!(tree[Rank(2)], 30);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);

use core::cmp::Ordering::{Equal, Greater, Less};

use rand::Rng;
use rand::rngs::SmallRng;
use smallvec::SmallVec;

use crate::comparator::Comparator;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

/// A root-to-node path. Expected depth is logarithmic, so the inline
/// capacity covers trees far past any realistic size without spilling.
pub(crate) type Spine = SmallVec<[Handle; 24]>;

/// The randomized order-statistic tree backing `RandTree`.
///
/// Balance comes entirely from randomness: insertion installs the new value
/// at a visited position with probability 1/(s+1) via a comparator split,
/// and removal of a two-child node rejoins its subtrees with the surviving
/// root picked in proportion to subtree size. Over the random choices made,
/// the shape is uniform across all search trees consistent with the stored
/// multiset, which bounds the expected height at O(log n) with no balance
/// metadata on the nodes.
pub(crate) struct RawRandTree<T> {
    nodes: Arena<Node<T>>,
    root: Option<Handle>,
    len: usize,
}

impl<T: Clone> Clone for RawRandTree<T> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            root: self.root,
            len: self.len,
        }
    }
}

impl<T> RawRandTree<T> {
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Finds a node equal to `value` by comparator-guided descent.
    pub(crate) fn find<C: Comparator<T>>(&self, cmp: &C, value: &T) -> Option<Handle> {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match cmp.compare(value, node.element()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Finds the node at zero-based `rank` in sorted order.
    pub(crate) fn select(&self, mut rank: usize) -> Option<Handle> {
        if rank >= self.len {
            return None;
        }

        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = subtree_size(&self.nodes, node.left());

            match rank.cmp(&left_size) {
                Less => current = node.left(),
                Equal => return Some(handle),
                Greater => {
                    rank -= left_size + 1;
                    current = node.right();
                }
            }
        }
        // `rank < len` guarantees the descent terminates at a node.
        unreachable!("`RawRandTree::select()` - size bookkeeping is inconsistent!")
    }

    /// Returns the zero-based rank of `value`, accumulating the left-subtree
    /// sizes passed over during descent; `None` if absent.
    pub(crate) fn rank_of<C: Comparator<T>>(&self, cmp: &C, value: &T) -> Option<usize> {
        let mut current = self.root;
        let mut preceding = 0;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = subtree_size(&self.nodes, node.left());

            match cmp.compare(value, node.element()) {
                Less => current = node.left(),
                Greater => {
                    preceding += left_size + 1;
                    current = node.right();
                }
                Equal => return Some(preceding + left_size),
            }
        }
        None
    }

    /// Inserts `value`, choosing its position by the 1/(s+1) root-insertion
    /// rule. The caller has already rejected duplicates when they are
    /// disallowed, so the insertion itself always succeeds.
    pub(crate) fn insert<C: Comparator<T>>(&mut self, cmp: &C, rng: &mut SmallRng, value: T) {
        let root = self.root.take();
        self.root = Some(insert_at(&mut self.nodes, cmp, rng, root, value));
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
    }

    /// Removes one node equal to `value` (the first met in descent order)
    /// and returns its element, or `None` if absent.
    pub(crate) fn remove<C: Comparator<T>>(&mut self, cmp: &C, rng: &mut SmallRng, value: &T) -> Option<T> {
        let root = self.root.take();
        let (root, removed) = remove_at(&mut self.nodes, cmp, rng, root, value);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Moves every element out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len);
        let mut spine: Spine = SmallVec::new();
        let mut current = self.root;

        while current.is_some() || !spine.is_empty() {
            while let Some(handle) = current {
                spine.push(handle);
                current = self.nodes.get(handle).left();
            }
            let handle = spine.pop().unwrap();
            current = self.nodes.get(handle).right();
            out.push(self.nodes.take(handle).into_element());
        }

        self.nodes.clear();
        self.root = None;
        self.len = 0;
        out
    }

    /// Pushes `start` and its chain of left children onto `spine`.
    pub(crate) fn push_left_spine(&self, start: Option<Handle>, spine: &mut Spine) {
        let mut current = start;
        while let Some(handle) = current {
            spine.push(handle);
            current = self.nodes.get(handle).left();
        }
    }

    /// Pushes `start` and its chain of right children onto `spine`.
    pub(crate) fn push_right_spine(&self, start: Option<Handle>, spine: &mut Spine) {
        let mut current = start;
        while let Some(handle) = current {
            spine.push(handle);
            current = self.nodes.get(handle).right();
        }
    }

    /// Builds the root-to-node path for the element at `rank`.
    ///
    /// # Panics
    ///
    /// Panics if `rank >= len`.
    pub(crate) fn path_to_rank(&self, mut rank: usize) -> Spine {
        assert!(rank < self.len, "`RawRandTree::path_to_rank()` - `rank` is out of range!");

        let mut path: Spine = SmallVec::new();
        let mut current = self.root;

        while let Some(handle) = current {
            path.push(handle);
            let node = self.nodes.get(handle);
            let left_size = subtree_size(&self.nodes, node.left());

            match rank.cmp(&left_size) {
                Less => current = node.left(),
                Equal => return path,
                Greater => {
                    rank -= left_size + 1;
                    current = node.right();
                }
            }
        }
        unreachable!("`RawRandTree::path_to_rank()` - size bookkeeping is inconsistent!")
    }

    /// Steps `path` to the in-order successor of its final node. An emptied
    /// path means the walk ran off the right end of the tree.
    pub(crate) fn advance_path(&self, path: &mut Spine) {
        let Some(&current) = path.last() else { return };

        if let Some(right) = self.nodes.get(current).right() {
            self.push_left_spine(Some(right), path);
            return;
        }

        // Climb until we leave a left subtree; its root is the successor.
        while let Some(child) = path.pop() {
            if let Some(&parent) = path.last()
                && self.nodes.get(parent).left() == Some(child)
            {
                return;
            }
        }
    }

    /// Steps `path` to the in-order predecessor of its final node. An empty
    /// path is the end position, so it steps back to the rightmost node.
    pub(crate) fn retreat_path(&self, path: &mut Spine) {
        if path.is_empty() {
            self.push_right_spine(self.root, path);
            return;
        }
        let current = *path.last().unwrap();

        if let Some(left) = self.nodes.get(current).left() {
            self.push_right_spine(Some(left), path);
            return;
        }

        // Climb until we leave a right subtree; its root is the predecessor.
        while let Some(child) = path.pop() {
            if let Some(&parent) = path.last()
                && self.nodes.get(parent).right() == Some(child)
            {
                return;
            }
        }
    }
}

#[inline]
fn subtree_size<T>(nodes: &Arena<Node<T>>, handle: Option<Handle>) -> usize {
    handle.map_or(0, |h| nodes.get(h).size())
}

/// Recomputes `handle`'s size from its (already correct) children.
fn refresh_size<T>(nodes: &mut Arena<Node<T>>, handle: Handle) {
    let node = nodes.get(handle);
    let size = 1 + subtree_size(nodes, node.left()) + subtree_size(nodes, node.right());
    nodes.get_mut(handle).set_size(size);
}

/// Partitions the subtree at `handle` around `pivot` into a strictly-less
/// part and a not-less part, refreshing sizes on the way back up.
fn split<T, C: Comparator<T>>(
    nodes: &mut Arena<Node<T>>,
    cmp: &C,
    handle: Option<Handle>,
    pivot: &T,
) -> (Option<Handle>, Option<Handle>) {
    let Some(handle) = handle else {
        return (None, None);
    };

    if cmp.compare(nodes.get(handle).element(), pivot) == Less {
        // `handle` and its left subtree are less; partition its right edge.
        let right = nodes.get(handle).right();
        let (less, not_less) = split(nodes, cmp, right, pivot);
        nodes.get_mut(handle).set_right(less);
        refresh_size(nodes, handle);
        (Some(handle), not_less)
    } else {
        let left = nodes.get(handle).left();
        let (less, not_less) = split(nodes, cmp, left, pivot);
        nodes.get_mut(handle).set_left(not_less);
        refresh_size(nodes, handle);
        (less, Some(handle))
    }
}

/// Joins two subtrees where every element of `left` precedes every element
/// of `right`. The surviving root is drawn with probability
/// size(left)/(size(left)+size(right)), recursively, which preserves the
/// uniform-shape property established at insertion.
fn join<T>(
    nodes: &mut Arena<Node<T>>,
    rng: &mut SmallRng,
    left: Option<Handle>,
    right: Option<Handle>,
) -> Option<Handle> {
    let (Some(l), Some(r)) = (left, right) else {
        return left.or(right);
    };

    let left_size = nodes.get(l).size();
    let right_size = nodes.get(r).size();

    if rng.gen_range(0..left_size + right_size) < left_size {
        let hanging = nodes.get(l).right();
        let joined = join(nodes, rng, hanging, Some(r));
        nodes.get_mut(l).set_right(joined);
        refresh_size(nodes, l);
        Some(l)
    } else {
        let hanging = nodes.get(r).left();
        let joined = join(nodes, rng, Some(l), hanging);
        nodes.get_mut(r).set_left(joined);
        refresh_size(nodes, r);
        Some(r)
    }
}

fn insert_at<T, C: Comparator<T>>(
    nodes: &mut Arena<Node<T>>,
    cmp: &C,
    rng: &mut SmallRng,
    handle: Option<Handle>,
    value: T,
) -> Handle {
    let size = subtree_size(nodes, handle);

    // Probability 1/(size+1); always taken at an empty position.
    if rng.gen_range(0..=size) == 0 {
        let (less, not_less) = split(nodes, cmp, handle, &value);
        let fresh = nodes.alloc(Node::new(value));
        let node = nodes.get_mut(fresh);
        node.set_left(less);
        node.set_right(not_less);
        refresh_size(nodes, fresh);
        return fresh;
    }

    // Not installed here, so the subtree is non-empty; recurse. Equal
    // elements descend right, matching the less/not-less split partition.
    let handle = handle.unwrap();
    if cmp.compare(&value, nodes.get(handle).element()) == Less {
        let child = nodes.get(handle).left();
        let child = insert_at(nodes, cmp, rng, child, value);
        nodes.get_mut(handle).set_left(Some(child));
    } else {
        let child = nodes.get(handle).right();
        let child = insert_at(nodes, cmp, rng, child, value);
        nodes.get_mut(handle).set_right(Some(child));
    }
    refresh_size(nodes, handle);
    handle
}

fn remove_at<T, C: Comparator<T>>(
    nodes: &mut Arena<Node<T>>,
    cmp: &C,
    rng: &mut SmallRng,
    handle: Option<Handle>,
    value: &T,
) -> (Option<Handle>, Option<T>) {
    let Some(current) = handle else {
        return (None, None);
    };

    match cmp.compare(value, nodes.get(current).element()) {
        Less => {
            let child = nodes.get(current).left();
            let (child, removed) = remove_at(nodes, cmp, rng, child, value);
            nodes.get_mut(current).set_left(child);
            if removed.is_some() {
                refresh_size(nodes, current);
            }
            (Some(current), removed)
        }
        Greater => {
            let child = nodes.get(current).right();
            let (child, removed) = remove_at(nodes, cmp, rng, child, value);
            nodes.get_mut(current).set_right(child);
            if removed.is_some() {
                refresh_size(nodes, current);
            }
            (Some(current), removed)
        }
        Equal => {
            // Covers all three shapes: a leaf joins two empty subtrees, a
            // one-child node promotes that child, two children are merged
            // by the size-weighted join.
            let (left, right) = nodes.get_mut(current).take_children();
            let joined = join(nodes, rng, left, right);
            let node = nodes.take(current);
            (joined, Some(node.into_element()))
        }
    }
}

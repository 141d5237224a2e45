use core::fmt;
use core::iter::FusedIterator;
use core::ops::{Index, IndexMut};

use crate::raw::{Arena, Handle};

#[derive(Clone)]
struct ListNode<T> {
    element: T,
    prev: Option<Handle>,
    next: Option<Handle>,
}

/// A doubly linked list with O(1) mutation at both ends and positional
/// access that walks from whichever end is nearer, O(min(i, len − i)).
///
/// Nodes live in an arena and link to their neighbors by handle: every
/// non-terminal node's `next.prev` and `prev.next` point back at it, and the
/// length is tracked incrementally rather than recomputed by traversal.
/// This is the engine behind deque- and queue-like wrappers; any blocking
/// behavior belongs to those wrappers, never here.
///
/// # Examples
///
/// ```
/// use treapless::LinkedList;
///
/// let mut list = LinkedList::new();
/// list.push_back(2);
/// list.push_front(1);
/// list.push_back(3);
///
/// assert_eq!(list.get(1), Some(&2));
/// assert_eq!(list.pop_front(), Some(1));
/// assert_eq!(list.pop_back(), Some(3));
/// ```
pub struct LinkedList<T> {
    nodes: Arena<ListNode<T>>,
    head: Option<Handle>,
    tail: Option<Handle>,
    len: usize,
}

/// An iterator over a [`LinkedList`], front to back.
///
/// Created by [`LinkedList::iter`]. Double-ended.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    list: &'a LinkedList<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over a [`LinkedList`], front to back.
pub struct IntoIter<T> {
    list: LinkedList<T>,
}

/// A bidirectional cursor over a [`LinkedList`], positionable at any index.
///
/// The cursor sits between elements: [`next`](Cursor::next) yields the
/// element at the current index and steps forward, [`prev`](Cursor::prev)
/// yields the element just before it and steps backward, each O(1) once
/// positioned.
///
/// # Examples
///
/// ```
/// use treapless::LinkedList;
///
/// let list: LinkedList<_> = (0..5).collect();
/// let mut cursor = list.cursor_at(2);
///
/// assert_eq!(cursor.next(), Some(&2));
/// assert_eq!(cursor.prev(), Some(&2));
/// assert_eq!(cursor.prev(), Some(&1));
/// ```
pub struct Cursor<'a, T: 'a> {
    list: &'a LinkedList<T>,
    /// Node at the current index; `None` is the end position.
    current: Option<Handle>,
    index: usize,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the list.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        self.head.map(|h| &self.nodes.get(h).element)
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[must_use]
    pub fn back(&self) -> Option<&T> {
        self.tail.map(|h| &self.nodes.get(h).element)
    }

    /// Prepends an element. O(1).
    pub fn push_front(&mut self, value: T) {
        let fresh = self.nodes.alloc(ListNode {
            element: value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old) => self.nodes.get_mut(old).prev = Some(fresh),
            None => self.tail = Some(fresh),
        }
        self.head = Some(fresh);
        self.len += 1;
    }

    /// Appends an element. O(1).
    pub fn push_back(&mut self, value: T) {
        let fresh = self.nodes.alloc(ListNode {
            element: value,
            prev: self.tail,
            next: None,
        });
        match self.tail {
            Some(old) => self.nodes.get_mut(old).next = Some(fresh),
            None => self.head = Some(fresh),
        }
        self.tail = Some(fresh);
        self.len += 1;
    }

    /// Removes and returns the first element, or `None` if empty. O(1).
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|h| self.unlink(h))
    }

    /// Removes and returns the last element, or `None` if empty. O(1).
    pub fn pop_back(&mut self) -> Option<T> {
        self.tail.map(|h| self.unlink(h))
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// range. Walks from the nearer end.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        (index < self.len).then(|| &self.nodes.get(self.handle_at(index)).element)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of range.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        (index < self.len).then(|| {
            let handle = self.handle_at(index);
            &mut self.nodes.get_mut(handle).element
        })
    }

    /// Replaces the element at `index` with `value`, returning the previous
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> T {
        assert!(index < self.len, "index out of bounds");
        let handle = self.handle_at(index);
        core::mem::replace(&mut self.nodes.get_mut(handle).element, value)
    }

    /// Inserts an element at `index`, walking from the nearer end.
    /// `index == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(index <= self.len, "index out of bounds");
        let anchor = (index < self.len).then(|| self.handle_at(index));
        self.insert_before(anchor, value);
    }

    /// Inserts every element of `values` at `index`, preserving their
    /// order, and returns how many were inserted.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> usize {
        assert!(index <= self.len, "index out of bounds");

        let anchor = (index < self.len).then(|| self.handle_at(index));
        let mut count = 0;
        for value in values {
            self.insert_before(anchor, value);
            count += 1;
        }
        count
    }

    /// Removes and returns the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.len, "index out of bounds");
        let handle = self.handle_at(index);
        self.unlink(handle)
    }

    /// Excises the elements at `first..=last`, relinking the remaining
    /// chain around the gap, and returns the segment as an independent
    /// list.
    ///
    /// # Panics
    ///
    /// Panics if `last >= len` or `first > last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::LinkedList;
    ///
    /// let mut list: LinkedList<_> = (0..6).collect();
    /// let mid = list.remove_range(2, 4);
    ///
    /// assert_eq!(mid.iter().copied().collect::<Vec<_>>(), [2, 3, 4]);
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 5]);
    /// ```
    pub fn remove_range(&mut self, first: usize, last: usize) -> LinkedList<T> {
        assert!(last < self.len, "index out of bounds");
        assert!(first <= last, "range is inverted");

        let count = last - first + 1;
        let start = self.handle_at(first);

        let mut segment = Vec::with_capacity(count);
        let mut current = Some(start);
        for _ in 0..count {
            let handle = current.expect("`LinkedList::remove_range()` - chain shorter than its length!");
            segment.push(handle);
            current = self.nodes.get(handle).next;
        }
        let end = *segment.last().unwrap();

        // Close the chain over the gap.
        let before = self.nodes.get(start).prev;
        let after = self.nodes.get(end).next;
        match before {
            Some(p) => self.nodes.get_mut(p).next = after,
            None => self.head = after,
        }
        match after {
            Some(n) => self.nodes.get_mut(n).prev = before,
            None => self.tail = before,
        }
        self.len -= count;

        let mut extracted = LinkedList::new();
        for handle in segment {
            extracted.push_back(self.nodes.take(handle).element);
        }
        extracted
    }

    /// Returns the index of the first element equal to `value`, or `None`.
    /// Linear scan from the front.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.iter().position(|element| element == value)
    }

    /// Removes every element, keeping the node storage for reuse.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Returns a double-ended iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Returns a bidirectional cursor positioned at `index`.
    /// `index == len()` is the end position.
    ///
    /// # Panics
    ///
    /// Panics if `index > len()`.
    #[must_use]
    pub fn cursor_at(&self, index: usize) -> Cursor<'_, T> {
        assert!(index <= self.len, "`LinkedList::cursor_at()` - `index` is out of range!");
        Cursor {
            list: self,
            current: (index < self.len).then(|| self.handle_at(index)),
            index,
        }
    }

    /// Walks to the node at `index` from whichever end is nearer.
    fn handle_at(&self, index: usize) -> Handle {
        debug_assert!(index < self.len);

        if index <= self.len / 2 {
            let mut handle = self.head.unwrap();
            for _ in 0..index {
                handle = self.nodes.get(handle).next.unwrap();
            }
            handle
        } else {
            let mut handle = self.tail.unwrap();
            for _ in 0..self.len - 1 - index {
                handle = self.nodes.get(handle).prev.unwrap();
            }
            handle
        }
    }

    /// Links `value` immediately before `anchor`; `None` appends.
    fn insert_before(&mut self, anchor: Option<Handle>, value: T) {
        let Some(anchor) = anchor else {
            self.push_back(value);
            return;
        };

        let before = self.nodes.get(anchor).prev;
        let fresh = self.nodes.alloc(ListNode {
            element: value,
            prev: before,
            next: Some(anchor),
        });
        self.nodes.get_mut(anchor).prev = Some(fresh);
        match before {
            Some(p) => self.nodes.get_mut(p).next = Some(fresh),
            None => self.head = Some(fresh),
        }
        self.len += 1;
    }

    /// Detaches `handle` from the chain and returns its element.
    fn unlink(&mut self, handle: Handle) -> T {
        let node = self.nodes.take(handle);
        match node.prev {
            Some(p) => self.nodes.get_mut(p).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(n) => self.nodes.get_mut(n).prev = node.prev,
            None => self.tail = node.prev,
        }
        self.len -= 1;
        node.element
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    /// Produces an independent structural copy of the chain.
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Structural equality: same length and equal elements in order.
impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for LinkedList<T> {}

impl<T> Index<usize> for LinkedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> IndexMut<usize> for LinkedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for LinkedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        let node = self.list.nodes.get(handle);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.element)
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

        let handle = self.back?;
        let node = self.list.nodes.get(handle);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.element)
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
            list: self.list,
            front: self.front,
            back: self.back,
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
        self.list.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.list.len
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<'a, T> Cursor<'a, T> {
    /// Returns the cursor's current position, in `0..=len`.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Yields the element at the current index and steps forward, or
    /// `None` at the end position.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&'a T> {
        let handle = self.current?;
        let node = self.list.nodes.get(handle);
        self.current = node.next;
        self.index += 1;
        Some(&node.element)
    }

    /// Yields the element just before the current index and steps
    /// backward, or `None` at the start position.
    pub fn prev(&mut self) -> Option<&'a T> {
        if self.index == 0 {
            return None;
        }

        let handle = match self.current {
            Some(h) => self.list.nodes.get(h).prev,
            None => self.list.tail,
        }
        .expect("`Cursor::prev()` - chain shorter than its length!");

        self.current = Some(handle);
        self.index -= 1;
        Some(&self.list.nodes.get(handle).element)
    }
}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish()
    }
}

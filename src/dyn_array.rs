use core::fmt;
use core::mem;
use core::ops::{Index, IndexMut};
use core::slice;

/// Capacity never shrinks below this floor, so alternating insert/remove
/// around a size boundary cannot thrash the allocator.
const MIN_CAPACITY: usize = 4;

/// A contiguous resizable array with an explicit capacity policy.
///
/// The buffer doubles when full and halves when utilization drops below 25%,
/// never below a minimum capacity of four slots. Appending at the tail is
/// amortized O(1); inserting or removing at an interior index is O(n) due to
/// shifting. All positional arguments outside `[0, len)` panic.
///
/// This is the indexed-access engine behind list-like wrappers; those
/// wrappers hold a `DynArray` as a private field and forward to it.
///
/// # Examples
///
/// ```
/// use treapless::DynArray;
///
/// let mut arr = DynArray::new();
/// arr.push(1);
/// arr.push(3);
/// arr.insert(1, 2);
///
/// assert_eq!(arr.as_slice(), &[1, 2, 3]);
/// assert_eq!(arr.set(0, 10), 1);
/// assert_eq!(arr.remove(2), 3);
/// assert_eq!(arr.as_slice(), &[10, 2]);
/// ```
pub struct DynArray<T> {
    buf: Vec<T>,
}

impl<T> DynArray<T> {
    /// Creates an empty array at the minimum capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::DynArray;
    ///
    /// let arr: DynArray<i32> = DynArray::new();
    /// assert!(arr.is_empty());
    /// assert_eq!(arr.capacity(), 4);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty array able to hold `capacity` elements without
    /// growing (never less than the minimum capacity).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity.max(MIN_CAPACITY)),
        }
    }

    /// Returns the number of elements in the array.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if the array contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of elements the array can hold before growing.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns a reference to the element at `index`, or `None` if out of
    /// range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.buf.get(index)
    }

    /// Returns a mutable reference to the element at `index`, or `None` if
    /// out of range.
    #[must_use]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.buf.get_mut(index)
    }

    /// Replaces the element at `index` with `value`, returning the previous
    /// element.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::DynArray;
    ///
    /// let mut arr: DynArray<_> = ["a", "b"].into_iter().collect();
    /// assert_eq!(arr.set(1, "c"), "b");
    /// assert_eq!(arr.as_slice(), &["a", "c"]);
    /// ```
    pub fn set(&mut self, index: usize, value: T) -> T {
        assert!(index < self.buf.len(), "index out of bounds");
        mem::replace(&mut self.buf[index], value)
    }

    /// Appends an element to the back of the array.
    ///
    /// # Time Complexity
    ///
    /// Amortized O(1); when the buffer is full it is copied into an
    /// allocation of twice the capacity.
    pub fn push(&mut self, value: T) {
        self.grow_if_full();
        self.buf.push(value);
    }

    /// Removes the last element and returns it, or `None` if the array is
    /// empty.
    pub fn pop(&mut self) -> Option<T> {
        let value = self.buf.pop();
        self.shrink_if_sparse();
        value
    }

    /// Inserts an element at `index`, shifting everything after it to the
    /// right. `index == len` appends.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Time Complexity
    ///
    /// O(n) for the shift; amortized O(1) at the tail.
    pub fn insert(&mut self, index: usize, value: T) {
        assert!(index <= self.buf.len(), "index out of bounds");
        self.grow_if_full();
        self.buf.insert(index, value);
    }

    /// Inserts every element of `values` at `index`, preserving their
    /// order, and returns how many were inserted.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::DynArray;
    ///
    /// let mut arr: DynArray<_> = [1, 5].into_iter().collect();
    /// assert_eq!(arr.insert_all(1, [2, 3, 4]), 3);
    /// assert_eq!(arr.as_slice(), &[1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: usize, values: I) -> usize {
        assert!(index <= self.buf.len(), "index out of bounds");

        let incoming: Vec<T> = values.into_iter().collect();
        let count = incoming.len();
        while self.buf.len() + count > self.buf.capacity() {
            self.buf.reserve_exact(self.buf.capacity());
        }
        self.buf.splice(index..index, incoming);
        count
    }

    /// Removes and returns the element at `index`, shifting everything
    /// after it to the left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    ///
    /// # Time Complexity
    ///
    /// O(n) for the shift; amortized O(1) at the tail.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(index < self.buf.len(), "index out of bounds");
        let value = self.buf.remove(index);
        self.shrink_if_sparse();
        value
    }

    /// Removes the elements at `first..=last`, shifting the tail down, and
    /// returns the extracted slice as an independent `DynArray`.
    ///
    /// # Panics
    ///
    /// Panics if `last >= len` or `first > last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treapless::DynArray;
    ///
    /// let mut arr: DynArray<_> = (0..6).collect();
    /// let mid = arr.remove_range(2, 4);
    ///
    /// assert_eq!(mid.as_slice(), &[2, 3, 4]);
    /// assert_eq!(arr.as_slice(), &[0, 1, 5]);
    /// ```
    pub fn remove_range(&mut self, first: usize, last: usize) -> DynArray<T> {
        assert!(last < self.buf.len(), "index out of bounds");
        assert!(first <= last, "range is inverted");

        let removed: Vec<T> = self.buf.drain(first..=last).collect();
        self.shrink_if_sparse();

        let mut extracted = DynArray::with_capacity(removed.len());
        extracted.buf.extend(removed);
        extracted
    }

    /// Returns the index of the first element equal to `value`, or `None`.
    /// Linear scan.
    #[must_use]
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.buf.iter().position(|element| element == value)
    }

    /// Removes every element and shrinks the buffer back to the minimum
    /// capacity.
    pub fn clear(&mut self) {
        self.buf.clear();
        self.shrink_if_sparse();
    }

    /// Returns the elements as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.buf
    }

    /// Returns a double-ended iterator over the elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.buf.iter()
    }

    /// Doubles the capacity when the buffer is full, so `Vec` never applies
    /// its own growth policy underneath us.
    fn grow_if_full(&mut self) {
        if self.buf.len() == self.buf.capacity() {
            self.buf.reserve_exact(self.buf.capacity());
        }
    }

    /// Halves the capacity (possibly repeatedly) while utilization is below
    /// 25%, stopping at the minimum capacity.
    fn shrink_if_sparse(&mut self) {
        let mut target = self.buf.capacity();
        while target > MIN_CAPACITY && self.buf.len() * 4 < target {
            target /= 2;
        }
        if target < self.buf.capacity() {
            self.buf.shrink_to(target.max(MIN_CAPACITY));
        }
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Produces an independent copy; mutating either array afterwards does
    /// not affect the other.
    fn clone(&self) -> Self {
        let mut copy = Self::with_capacity(self.buf.len());
        copy.buf.extend(self.buf.iter().cloned());
        copy
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

/// Structural equality: same length and equal elements in order.
impl<T: PartialEq> PartialEq for DynArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.buf == other.buf
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T> Index<usize> for DynArray<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.buf[index]
    }
}

impl<T> IndexMut<usize> for DynArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.buf[index]
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.buf.iter()
    }
}

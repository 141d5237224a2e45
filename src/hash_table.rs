use core::cell::Cell;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::ops::Index;

use ahash::RandomState;

/// Number of buckets a fresh table starts with.
const INITIAL_BUCKETS: usize = 16;

/// Resize when `len + 1 > buckets * LOAD_NUM / LOAD_DEN`, i.e. a 0.75
/// load factor without touching floating point.
const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;

/// A separate-chaining hash table with load-factor-driven resizing and a
/// collision probe counter.
///
/// Every association lands in the bucket its key hashes to; a key appears
/// in at most one chain, and the length is the total chain length. When an
/// insertion would push the load factor past 3/4 the bucket array doubles
/// and every association is rehashed into the new layout.
///
/// The table keeps a running count of chain probes: every entry a search
/// inspects beyond the first in its bucket, including during read-only
/// lookups. [`collisions`](HashTable::collisions) exposes it and a rehash
/// resets it, which makes chain quality observable without instrumenting
/// call sites.
///
/// # Examples
///
/// ```
/// use treapless::HashTable;
///
/// let mut table = HashTable::new();
/// table.insert("one", 1);
/// table.insert("two", 2);
///
/// assert_eq!(table.get(&"one"), Some(&1));
/// assert_eq!(table.insert("two", 22), Some(2));
/// assert_eq!(table.remove(&"one"), Some(1));
/// assert_eq!(table.len(), 1);
/// ```
pub struct HashTable<K, V, S = RandomState> {
    buckets: Vec<Vec<(K, V)>>,
    len: usize,
    hasher: S,
    collisions: Cell<u64>,
}

/// An iterator over a [`HashTable`]'s associations in bucket order.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K: 'a, V: 'a> {
    outer: core::slice::Iter<'a, Vec<(K, V)>>,
    inner: core::slice::Iter<'a, (K, V)>,
    remaining: usize,
}

/// An owning iterator over a [`HashTable`]'s associations in bucket order.
pub struct IntoIter<K, V> {
    outer: std::vec::IntoIter<Vec<(K, V)>>,
    inner: std::vec::IntoIter<(K, V)>,
    remaining: usize,
}

/// An iterator over a [`HashTable`]'s keys.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

/// An iterator over a [`HashTable`]'s values.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K: 'a, V: 'a> {
    inner: Iter<'a, K, V>,
}

impl<K, V> HashTable<K, V, RandomState> {
    /// Creates an empty table with the default bucket count and a
    /// randomly keyed hasher.
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::new())
    }

    /// Creates an empty table sized so that `capacity` associations fit
    /// without triggering a resize.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let mut buckets = INITIAL_BUCKETS;
        while capacity > buckets * LOAD_NUM / LOAD_DEN {
            buckets *= 2;
        }

        Self {
            buckets: (0..buckets).map(|_| Vec::new()).collect(),
            len: 0,
            hasher: RandomState::new(),
            collisions: Cell::new(0),
        }
    }
}

impl<K, V, S> HashTable<K, V, S> {
    /// Creates an empty table that hashes with `hasher`.
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            buckets: (0..INITIAL_BUCKETS).map(|_| Vec::new()).collect(),
            len: 0,
            hasher,
            collisions: Cell::new(0),
        }
    }

    /// Returns the number of associations in the table.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table contains no associations.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the current number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the number of chain probes past the first entry since the
    /// last rehash.
    #[must_use]
    pub fn collisions(&self) -> u64 {
        self.collisions.get()
    }

    /// Removes every association, keeping the bucket array and hasher.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
        self.collisions.set(0);
    }

    /// Returns an iterator over the associations in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            outer: self.buckets.iter(),
            inner: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys in bucket order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in bucket order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns `true` if any association holds `value`. Linear scan.
    #[must_use]
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashTable<K, V, S> {
    /// Inserts `value` under `key`, returning the previous value if the
    /// key was already present. O(1) expected.
    ///
    /// Only a new association counts toward the load factor; replacing the
    /// value under an existing key never resizes.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_index(&key);
        if let Some(i) = self.chain_find(bucket, &key) {
            return Some(core::mem::replace(&mut self.buckets[bucket][i].1, value));
        }

        if self.len + 1 > self.buckets.len() * LOAD_NUM / LOAD_DEN {
            self.grow();
        }
        let bucket = self.bucket_index(&key);
        self.buckets[bucket].push((key, value));
        self.len += 1;
        None
    }

    /// Returns a reference to the value under `key`, or `None`. O(1)
    /// expected.
    #[must_use]
    pub fn get(&self, key: &K) -> Option<&V> {
        let bucket = self.bucket_index(key);
        self.chain_find(bucket, key).map(|i| &self.buckets[bucket][i].1)
    }

    /// Returns a mutable reference to the value under `key`, or `None`.
    #[must_use]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let bucket = self.bucket_index(key);
        self.chain_find(bucket, key)
            .map(|i| &mut self.buckets[bucket][i].1)
    }

    /// Returns `true` if the table holds an association under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &K) -> bool {
        let bucket = self.bucket_index(key);
        self.chain_find(bucket, key).is_some()
    }

    /// Removes the association under `key`, returning its value if it was
    /// present. O(1) expected.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let bucket = self.bucket_index(key);
        let i = self.chain_find(bucket, key)?;
        self.len -= 1;
        Some(self.buckets[bucket].swap_remove(i).1)
    }

    /// Copies every association from `other` into `self`, replacing values
    /// under keys already present.
    pub fn extend_from<S2>(&mut self, other: &HashTable<K, V, S2>)
    where
        K: Clone,
        V: Clone,
    {
        for (key, value) in other.iter() {
            self.insert(key.clone(), value.clone());
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        self.hasher.hash_one(key) as usize % self.buckets.len()
    }

    /// Scans a chain for `key`, charging one collision per entry inspected
    /// beyond the first.
    fn chain_find(&self, bucket: usize, key: &K) -> Option<usize> {
        let mut probes = 0;
        let mut found = None;
        for (i, (k, _)) in self.buckets[bucket].iter().enumerate() {
            if i > 0 {
                probes += 1;
            }
            if k == key {
                found = Some(i);
                break;
            }
        }
        self.collisions.set(self.collisions.get() + probes);
        found
    }

    /// Doubles the bucket array and rehashes every association. The
    /// collision count restarts for the new layout.
    fn grow(&mut self) {
        let doubled = self.buckets.len() * 2;
        let old = core::mem::replace(
            &mut self.buckets,
            (0..doubled).map(|_| Vec::new()).collect(),
        );

        for (key, value) in old.into_iter().flatten() {
            let bucket = self.bucket_index(&key);
            self.buckets[bucket].push((key, value));
        }
        self.collisions.set(0);
    }
}

impl<K, V, S: Default> Default for HashTable<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Clone, V: Clone, S: Clone> Clone for HashTable<K, V, S> {
    /// Produces an independent table with the same layout and hasher
    /// keys, so cloned associations land in the same buckets.
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hasher: self.hasher.clone(),
            collisions: self.collisions.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashTable<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Structural equality: same associations regardless of bucket layout.
impl<K: Hash + Eq, V: PartialEq, S: BuildHasher> PartialEq for HashTable<K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<K: Hash + Eq, V: Eq, S: BuildHasher> Eq for HashTable<K, V, S> {}

impl<K: Hash + Eq, V, S: BuildHasher> Index<&K> for HashTable<K, V, S> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashTable<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::default();
        table.extend(iter);
        table
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashTable<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            outer: self.buckets.into_iter(),
            inner: Vec::new().into_iter(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((key, value)) = self.inner.next() {
                self.remaining -= 1;
                return Some((key, value));
            }
            self.inner = self.outer.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            outer: self.outer.clone(),
            inner: self.inner.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(pair) = self.inner.next() {
                self.remaining -= 1;
                return Some(pair);
            }
            self.inner = self.outer.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K, V> FusedIterator for Values<'_, K, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_and_reports_the_previous_value() {
        let mut table = HashTable::new();

        assert_eq!(table.insert("a", 1), None);
        assert_eq!(table.insert("a", 2), Some(1));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(&"a"), Some(&2));
    }

    #[test]
    fn buckets_double_when_the_load_factor_is_exceeded() {
        let mut table = HashTable::new();
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS);

        // 12 associations fit 16 buckets at a 3/4 load; the 13th does not.
        for i in 0..12 {
            table.insert(i, i);
        }
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS);

        table.insert(12, 12);
        assert_eq!(table.bucket_count(), INITIAL_BUCKETS * 2);
        assert_eq!(table.len(), 13);

        for i in 0..13 {
            assert_eq!(table.get(&i), Some(&i));
        }
    }

    #[test]
    fn replacing_at_the_load_threshold_does_not_resize() {
        let mut table = HashTable::new();
        // 12 entries sit exactly at the 3/4 load of 16 buckets.
        for i in 0..12 {
            table.insert(i, i);
        }
        let buckets = table.bucket_count();
        let collisions = table.collisions();

        assert_eq!(table.insert(0, 99), Some(0));
        assert_eq!(table.bucket_count(), buckets);
        assert!(table.collisions() >= collisions);
        assert_eq!(table.len(), 12);
        assert_eq!(table.get(&0), Some(&99));
    }

    #[test]
    fn with_capacity_avoids_early_resizes() {
        let mut table = HashTable::with_capacity(100);
        let buckets = table.bucket_count();

        for i in 0..100 {
            table.insert(i, ());
        }
        assert_eq!(table.bucket_count(), buckets);
    }

    #[test]
    fn collisions_reset_on_rehash() {
        // A keyed hasher makes the probe pattern deterministic.
        let mut table: HashTable<u32, u32> =
            HashTable::with_hasher(RandomState::with_seeds(1, 2, 3, 4));

        for i in 0..12 {
            table.insert(i, i);
        }
        for i in 0..12 {
            let _ = table.get(&i);
        }
        let before = table.collisions();

        table.insert(12, 12);
        assert!(table.collisions() <= before);
    }

    #[test]
    fn contains_value_scans_every_chain() {
        let table: HashTable<_, _> = (0..20).map(|i| (i, i * 10)).collect();

        assert!(table.contains_value(&190));
        assert!(!table.contains_value(&191));
    }

    #[test]
    fn equality_ignores_bucket_layout() {
        let small: HashTable<_, _> = (0..8).map(|i| (i, i)).collect();
        let mut large = HashTable::with_capacity(200);
        large.extend((0..8).map(|i| (i, i)));

        assert_ne!(small.bucket_count(), large.bucket_count());
        assert_eq!(small, large);
    }

    #[test]
    fn clone_is_independent() {
        let original: HashTable<_, _> = (0..10).map(|i| (i, i)).collect();
        let mut copy = original.clone();
        copy.remove(&3);
        copy.insert(100, 100);

        assert_eq!(original.len(), 10);
        assert!(original.contains_key(&3));
        assert!(!original.contains_key(&100));
        assert_eq!(copy.len(), 10);
    }

    #[test]
    fn iteration_visits_every_association_once() {
        let table: HashTable<_, _> = (0..50).map(|i| (i, i)).collect();

        let mut keys: Vec<_> = table.keys().copied().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..50).collect::<Vec<_>>());

        let mut drained: Vec<_> = table.into_iter().map(|(k, _)| k).collect();
        drained.sort_unstable();
        assert_eq!(drained, (0..50).collect::<Vec<_>>());
    }
}

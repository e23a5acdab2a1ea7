use alloc::collections::BTreeMap;
use core::hash::Hash;

import_hash_collections!(HashMap);

#[derive(Copy, Clone, Debug)]
struct Slot {
    count: u64,
    arrival: u64,
}

/// Keys grouped by access count.
///
/// Every key sits in exactly one bucket. Inside a bucket keys are ordered by
/// the moment they arrived there, so the first key of the lowest bucket is
/// the least frequently used one, ties going to whoever reached that count
/// first. Empty buckets are dropped.
#[derive(Clone)]
pub(crate) struct FrequencyBuckets<K> {
    buckets: BTreeMap<u64, BTreeMap<u64, K>>,
    entries: HashMap<K, Slot>,
    arrivals: u64,
}

impl<K: Hash + Eq + Clone> FrequencyBuckets<K> {
    pub(crate) fn new() -> Self {
        Self {
            buckets: BTreeMap::new(),
            entries: HashMap::new(),
            arrivals: 0,
        }
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            buckets: BTreeMap::new(),
            entries: HashMap::with_capacity(cap),
            arrivals: 0,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    #[inline]
    pub(crate) fn count(&self, key: &K) -> Option<u64> {
        self.entries.get(key).map(|s| s.count)
    }

    /// Starts tracking `key` with a count of 1. Returns `false` if the key
    /// is already tracked.
    pub(crate) fn insert(&mut self, key: K) -> bool {
        if self.entries.contains_key(&key) {
            return false;
        }

        let slot = Slot {
            count: 1,
            arrival: self.next_arrival(),
        };
        self.buckets
            .entry(slot.count)
            .or_default()
            .insert(slot.arrival, key.clone());
        self.entries.insert(key, slot);
        true
    }

    /// Stops tracking `key` and returns its last count.
    pub(crate) fn remove(&mut self, key: &K) -> Option<u64> {
        let slot = self.entries.remove(key)?;
        Self::unlink(&mut self.buckets, slot);
        Some(slot.count)
    }

    /// Bumps the count of `key` and returns the new one.
    pub(crate) fn increment(&mut self, key: &K) -> Option<u64> {
        let count = self.entries.get(key)?.count;
        self.relocate(key, count.saturating_add(1))
    }

    /// Lowers the count of `key` by one, never below 1, and returns the new
    /// count. A key already at 1 keeps its place in the bucket.
    pub(crate) fn decrement(&mut self, key: &K) -> Option<u64> {
        let count = self.entries.get(key)?.count;
        if count <= 1 {
            return Some(count);
        }
        self.relocate(key, count - 1)
    }

    /// The first key of the lowest populated bucket.
    pub(crate) fn min(&self) -> Option<&K> {
        self.buckets.values().next().and_then(|b| b.values().next())
    }

    /// The first key of the bucket for exactly `count`.
    pub(crate) fn first_with_count(&self, count: u64) -> Option<&K> {
        self.buckets.get(&count).and_then(|b| b.values().next())
    }

    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
        self.entries.clear();
        self.arrivals = 0;
    }

    fn relocate(&mut self, key: &K, count: u64) -> Option<u64> {
        let arrival = self.next_arrival();
        let slot = self.entries.get_mut(key)?;
        let old = *slot;
        slot.count = count;
        slot.arrival = arrival;

        let key = Self::unlink(&mut self.buckets, old)?;
        self.buckets.entry(count).or_default().insert(arrival, key);
        Some(count)
    }

    fn unlink(buckets: &mut BTreeMap<u64, BTreeMap<u64, K>>, slot: Slot) -> Option<K> {
        let bucket = buckets.get_mut(&slot.count)?;
        let key = bucket.remove(&slot.arrival);
        if bucket.is_empty() {
            buckets.remove(&slot.count);
        }
        key
    }

    #[inline]
    fn next_arrival(&mut self) -> u64 {
        let arrival = self.arrivals;
        self.arrivals += 1;
        arrival
    }
}

#[cfg(test)]
mod test {
    use super::FrequencyBuckets;

    #[test]
    fn test_insert_and_min() {
        let mut f = FrequencyBuckets::new();
        assert_eq!(f.min(), None);
        assert!(f.insert(1));
        assert!(f.insert(2));
        assert!(!f.insert(1));
        assert_eq!(f.len(), 2);
        assert_eq!(f.count(&1), Some(1));
        // ties go to the earlier arrival
        assert_eq!(f.min(), Some(&1));
    }

    #[test]
    fn test_increment_moves_bucket() {
        let mut f = FrequencyBuckets::with_capacity(3);
        f.insert("a");
        f.insert("b");
        f.insert("c");

        assert_eq!(f.increment(&"a"), Some(2));
        assert_eq!(f.min(), Some(&"b"));
        assert_eq!(f.increment(&"b"), Some(2));
        assert_eq!(f.min(), Some(&"c"));
        assert_eq!(f.increment(&"c"), Some(2));
        // everyone at 2, "a" got there first
        assert_eq!(f.min(), Some(&"a"));
        assert_eq!(f.first_with_count(1), None);
        assert_eq!(f.increment(&"missing"), None);
        assert_eq!(f.buckets.len(), 1);
    }

    #[test]
    fn test_decrement_floor() {
        let mut f = FrequencyBuckets::new();
        f.insert(1);
        f.insert(2);
        f.increment(&1);
        f.increment(&1);

        assert_eq!(f.decrement(&1), Some(2));
        assert_eq!(f.decrement(&1), Some(1));
        assert_eq!(f.decrement(&1), Some(1));
        assert_eq!(f.count(&1), Some(1));
        // 1 re-entered bucket 1 after 2 did
        assert_eq!(f.first_with_count(1), Some(&2));
        assert_eq!(f.decrement(&9), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut f = FrequencyBuckets::new();
        f.insert(1);
        f.insert(2);
        f.increment(&2);

        assert_eq!(f.remove(&1), Some(1));
        assert_eq!(f.remove(&1), None);
        assert!(!f.contains(&1));
        assert_eq!(f.first_with_count(1), None);
        assert_eq!(f.min(), Some(&2));

        f.clear();
        assert!(f.is_empty());
        assert_eq!(f.min(), None);
    }
}

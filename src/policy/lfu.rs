use crate::ds::FrequencyBuckets;
use crate::policy::{BuildPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;

/// `LFUPolicy` evicts the least frequently used key.
///
/// Every key starts with an access count of 1 and each touch adds one. When
/// several keys share the lowest count, the one that reached that count
/// first is evicted.
///
/// # Example
/// ```rust
/// use policy_caches::policy::{LFUPolicy, Policy};
///
/// let mut p = LFUPolicy::new();
/// p.insert(&"a").unwrap();
/// p.insert(&"b").unwrap();
/// p.touch(&"a");
///
/// assert_eq!(p.frequency(&"a"), Some(2));
/// assert_eq!(p.victim().into_option(), Some("b"));
/// ```
#[derive(Clone)]
pub struct LFUPolicy<K> {
    freq: FrequencyBuckets<K>,
}

impl<K: Hash + Eq + Clone> LFUPolicy<K> {
    /// Creates an empty `LFUPolicy`.
    pub fn new() -> Self {
        Self {
            freq: FrequencyBuckets::new(),
        }
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.count(key)
    }

    #[inline]
    pub(crate) fn buckets(&self) -> &FrequencyBuckets<K> {
        &self.freq
    }
}

impl<K: Hash + Eq + Clone> Default for LFUPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> Policy<K> for LFUPolicy<K> {
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        if self.freq.insert(key.clone()) {
            Ok(())
        } else {
            Err(CacheError::InvalidKey(key.clone()))
        }
    }

    fn remove(&mut self, key: &K) {
        self.freq.remove(key);
    }

    fn touch(&mut self, key: &K) {
        self.freq.increment(key);
    }

    fn clear(&mut self) {
        self.freq.clear();
    }

    fn victim(&mut self) -> Victim<K> {
        self.freq.min().cloned().into()
    }

    fn contains(&self, key: &K) -> bool {
        self.freq.contains(key)
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn is_empty(&self) -> bool {
        self.freq.is_empty()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lfu
    }
}

impl<K: Hash + Eq + Clone> BuildPolicy<K> for LFUPolicy<K> {
    fn with_capacity(size: usize) -> Self {
        Self {
            freq: FrequencyBuckets::with_capacity(size),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::policy::{LFUPolicy, Policy};
    use crate::{CacheError, Victim};

    #[test]
    fn test_lfu_victim() {
        let mut p = LFUPolicy::new();
        assert_eq!(p.victim(), Victim::empty());

        for k in 1..=3 {
            p.insert(&k).unwrap();
        }
        p.touch(&1);
        p.touch(&1);
        p.touch(&3);
        // 1 -> 3, 2 -> 1, 3 -> 2
        assert_eq!(p.victim(), Victim::new(2));

        p.remove(&2);
        assert_eq!(p.victim(), Victim::new(3));

        p.touch(&3);
        // 1 and 3 both at 3, 1 got there first
        assert_eq!(p.victim(), Victim::new(1));
        assert_eq!(p.frequency(&3), Some(3));
    }

    #[test]
    fn test_lfu_duplicate_keeps_count() {
        let mut p = LFUPolicy::new();
        p.insert(&1).unwrap();
        p.touch(&1);
        assert_eq!(p.insert(&1), Err(CacheError::InvalidKey(1)));
        assert_eq!(p.frequency(&1), Some(2));
    }
}

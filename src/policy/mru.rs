use crate::ds::Keys;
use crate::policy::{BuildPolicy, LRUPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;

/// `MRUPolicy` evicts the most recently used key.
///
/// It shares the recency list of [`LRUPolicy`] and only picks its victim
/// from the other end.
///
/// # Example
/// ```rust
/// use policy_caches::policy::{MRUPolicy, Policy};
///
/// let mut p = MRUPolicy::new();
/// p.insert(&1).unwrap();
/// p.insert(&2).unwrap();
/// p.insert(&3).unwrap();
/// p.touch(&1);
/// assert_eq!(p.victim().into_option(), Some(1));
/// ```
#[derive(Clone)]
pub struct MRUPolicy<K> {
    inner: LRUPolicy<K>,
}

impl<K: Hash + Eq + Clone> MRUPolicy<K> {
    /// Creates an empty `MRUPolicy`.
    pub fn new() -> Self {
        Self {
            inner: LRUPolicy::new(),
        }
    }

    /// Iterates over the tracked keys, most recently used first.
    pub fn keys(&self) -> Keys<'_, K> {
        self.inner.keys()
    }
}

impl<K: Hash + Eq + Clone> Default for MRUPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> Policy<K> for MRUPolicy<K> {
    #[inline]
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        self.inner.insert(key)
    }

    #[inline]
    fn remove(&mut self, key: &K) {
        self.inner.remove(key)
    }

    #[inline]
    fn touch(&mut self, key: &K) {
        self.inner.touch(key)
    }

    #[inline]
    fn clear(&mut self) {
        self.inner.clear()
    }

    fn victim(&mut self) -> Victim<K> {
        self.inner.most_recent().cloned().into()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.inner.contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Mru
    }
}

impl<K: Hash + Eq + Clone> BuildPolicy<K> for MRUPolicy<K> {
    fn with_capacity(size: usize) -> Self {
        Self {
            inner: LRUPolicy::with_capacity(size),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::policy::{MRUPolicy, Policy};
    use crate::Victim;

    #[test]
    fn test_mru_victim() {
        let mut p = MRUPolicy::new();
        assert_eq!(p.victim(), Victim::empty());

        for k in 1..=3 {
            p.insert(&k).unwrap();
        }
        // (MRU) [3, 2, 1] (LRU)
        assert_eq!(p.victim(), Victim::new(3));

        p.touch(&1);
        assert_eq!(p.victim(), Victim::new(1));

        p.remove(&1);
        assert_eq!(p.victim(), Victim::new(3));
        assert_eq!(p.len(), 2);
    }
}

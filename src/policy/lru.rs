use crate::ds::{KeyList, Keys};
use crate::policy::{BuildPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;

/// `LRUPolicy` evicts the least recently used key.
///
/// Keys are kept in a recency list: inserting or touching a key moves it to
/// the front, and the victim is the key at the back.
///
/// # Example
/// ```rust
/// use policy_caches::policy::{LRUPolicy, Policy};
///
/// let mut p = LRUPolicy::new();
/// p.insert(&1).unwrap();
/// p.insert(&2).unwrap();
/// p.insert(&3).unwrap();
/// p.touch(&1);
///
/// // (MRU) [1, 3, 2] (LRU)
/// assert_eq!(p.victim().into_option(), Some(2));
/// assert_eq!(p.keys().copied().collect::<Vec<_>>(), vec![1, 3, 2]);
/// ```
#[derive(Clone)]
pub struct LRUPolicy<K> {
    list: KeyList<K>,
}

impl<K: Hash + Eq + Clone> LRUPolicy<K> {
    /// Creates an empty `LRUPolicy`.
    pub fn new() -> Self {
        Self {
            list: KeyList::new(),
        }
    }

    /// Iterates over the tracked keys, most recently used first.
    pub fn keys(&self) -> Keys<'_, K> {
        self.list.iter()
    }

    /// Returns the most recently used key.
    pub fn most_recent(&self) -> Option<&K> {
        self.list.front()
    }

    /// Returns the least recently used key.
    pub fn least_recent(&self) -> Option<&K> {
        self.list.back()
    }
}

impl<K: Hash + Eq + Clone> Default for LRUPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> Policy<K> for LRUPolicy<K> {
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        if self.list.push_front(key.clone()) {
            Ok(())
        } else {
            Err(CacheError::InvalidKey(key.clone()))
        }
    }

    fn remove(&mut self, key: &K) {
        self.list.remove(key);
    }

    fn touch(&mut self, key: &K) {
        self.list.move_to_front(key);
    }

    fn clear(&mut self) {
        self.list.clear();
    }

    fn victim(&mut self) -> Victim<K> {
        self.list.back().cloned().into()
    }

    fn contains(&self, key: &K) -> bool {
        self.list.contains(key)
    }

    fn len(&self) -> usize {
        self.list.len()
    }

    fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Lru
    }
}

impl<K: Hash + Eq + Clone> BuildPolicy<K> for LRUPolicy<K> {
    fn with_capacity(size: usize) -> Self {
        Self {
            list: KeyList::with_capacity(size),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::policy::{LRUPolicy, Policy};
    use crate::{CacheError, Victim};
    use alloc::vec::Vec;

    #[test]
    fn test_lru_victim_order() {
        let mut p = LRUPolicy::new();
        for k in 1..=4 {
            p.insert(&k).unwrap();
        }
        // (MRU) [4, 3, 2, 1] (LRU)
        assert_eq!(p.victim(), Victim::new(1));

        p.touch(&1);
        p.touch(&2);
        // (MRU) [2, 1, 4, 3] (LRU)
        assert_eq!(p.keys().copied().collect::<Vec<_>>(), [2, 1, 4, 3]);
        assert_eq!(p.victim(), Victim::new(3));

        // victim does not forget the key
        assert!(p.contains(&3));
        p.remove(&3);
        assert_eq!(p.victim(), Victim::new(4));
        assert_eq!(p.most_recent(), Some(&2));
        assert_eq!(p.least_recent(), Some(&4));
    }

    #[test]
    fn test_lru_unknown_keys() {
        let mut p: LRUPolicy<u32> = LRUPolicy::new();
        p.touch(&1);
        p.remove(&1);
        assert!(p.is_empty());
        assert_eq!(p.victim(), Victim::empty());

        p.insert(&1).unwrap();
        assert_eq!(p.insert(&1), Err(CacheError::InvalidKey(1)));
        assert_eq!(p.len(), 1);
    }
}

use crate::policy::{BuildPolicy, LFUPolicy, LRUPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;
use log::trace;

/// `AdaptivePolicy` is an adaptive replacement policy (ARC).
///
/// It keeps four sets of keys:
/// - `recent` (T1): resident keys seen once, in LRU order,
/// - `frequent` (T2): resident keys seen more than once, in LFU order,
/// - `recent_ghost` (B1) and `frequent_ghost` (B2): recently evicted keys
///   from T1 and T2, remembered without their values.
///
/// Touching a key in T1 promotes it to T2. Inserting a key that is still
/// remembered by a ghost set places it straight into T2. The victim is taken
/// from T1 while T1 is the larger resident set, otherwise from T2. Each
/// ghost set holds at most half the cache capacity.
///
/// # Example
/// ```rust
/// use policy_caches::policy::{AdaptivePolicy, Policy};
///
/// let mut p = AdaptivePolicy::new(4);
/// p.insert(&1).unwrap();
/// p.insert(&2).unwrap();
/// p.touch(&1);
/// assert_eq!(p.recent_len(), 1);
/// assert_eq!(p.frequent_len(), 1);
///
/// // evicting 2 leaves a ghost behind
/// p.remove(&2);
/// assert_eq!(p.recent_ghost_len(), 1);
///
/// // and coming back from a ghost means frequent
/// p.insert(&2).unwrap();
/// assert_eq!(p.frequent_len(), 2);
/// assert_eq!(p.recent_ghost_len(), 0);
/// ```
#[derive(Clone)]
pub struct AdaptivePolicy<K> {
    size: usize,
    recent: LRUPolicy<K>,
    recent_ghost: LRUPolicy<K>,
    frequent: LFUPolicy<K>,
    frequent_ghost: LFUPolicy<K>,
}

impl<K: Hash + Eq + Clone> AdaptivePolicy<K> {
    /// Creates an empty `AdaptivePolicy` for a cache of `size` entries.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            recent: LRUPolicy::with_capacity(size),
            recent_ghost: LRUPolicy::with_capacity(size / 2),
            frequent: LFUPolicy::with_capacity(size),
            frequent_ghost: LFUPolicy::with_capacity(size / 2),
        }
    }

    /// Returns the number of resident keys seen once (T1).
    pub fn recent_len(&self) -> usize {
        self.recent.len()
    }

    /// Returns the number of resident keys seen more than once (T2).
    pub fn frequent_len(&self) -> usize {
        self.frequent.len()
    }

    /// Returns the number of keys remembered after eviction from T1 (B1).
    pub fn recent_ghost_len(&self) -> usize {
        self.recent_ghost.len()
    }

    /// Returns the number of keys remembered after eviction from T2 (B2).
    pub fn frequent_ghost_len(&self) -> usize {
        self.frequent_ghost.len()
    }

    /// Returns `true` if `key` is resident in T1.
    pub fn is_recent(&self, key: &K) -> bool {
        self.recent.contains(key)
    }

    /// Returns `true` if `key` is resident in T2.
    pub fn is_frequent(&self, key: &K) -> bool {
        self.frequent.contains(key)
    }

    /// Returns `true` if `key` is remembered by either ghost set.
    pub fn is_ghost(&self, key: &K) -> bool {
        self.recent_ghost.contains(key) || self.frequent_ghost.contains(key)
    }

    #[inline]
    fn ghost_limit(&self) -> usize {
        self.size / 2
    }

    fn trim<P: Policy<K>>(ghost: &mut P, limit: usize) {
        while ghost.len() > limit {
            match ghost.victim().into_option() {
                Some(key) => ghost.remove(&key),
                None => break,
            }
        }
    }
}

impl<K: Hash + Eq + Clone> Policy<K> for AdaptivePolicy<K> {
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        if self.contains(key) {
            return Err(CacheError::InvalidKey(key.clone()));
        }

        if self.recent_ghost.contains(key) {
            trace!("policy_caches: adaptive policy hit in the recent ghost list");
            self.recent_ghost.remove(key);
            self.frequent.insert(key)
        } else if self.frequent_ghost.contains(key) {
            trace!("policy_caches: adaptive policy hit in the frequent ghost list");
            self.frequent_ghost.remove(key);
            self.frequent.insert(key)
        } else {
            self.recent.insert(key)
        }
    }

    fn remove(&mut self, key: &K) {
        let limit = self.ghost_limit();
        if self.recent.contains(key) {
            self.recent.remove(key);
            if limit > 0 && !self.recent_ghost.contains(key) {
                let linked = self.recent_ghost.insert(key);
                debug_assert!(linked.is_ok());
            }
            Self::trim(&mut self.recent_ghost, limit);
        } else if self.frequent.contains(key) {
            self.frequent.remove(key);
            if limit > 0 && !self.frequent_ghost.contains(key) {
                let linked = self.frequent_ghost.insert(key);
                debug_assert!(linked.is_ok());
            }
            Self::trim(&mut self.frequent_ghost, limit);
        }
    }

    fn touch(&mut self, key: &K) {
        if self.recent.contains(key) {
            self.recent.remove(key);
            // resident keys live in exactly one of T1 and T2
            let promoted = self.frequent.insert(key);
            debug_assert!(promoted.is_ok());
        } else {
            self.frequent.touch(key);
        }
    }

    fn clear(&mut self) {
        self.recent.clear();
        self.recent_ghost.clear();
        self.frequent.clear();
        self.frequent_ghost.clear();
    }

    fn victim(&mut self) -> Victim<K> {
        if self.recent.len() > self.frequent.len() {
            self.recent.victim()
        } else {
            self.frequent.victim()
        }
    }

    fn contains(&self, key: &K) -> bool {
        self.recent.contains(key) || self.frequent.contains(key)
    }

    fn len(&self) -> usize {
        self.recent.len() + self.frequent.len()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::Adaptive
    }
}

impl<K: Hash + Eq + Clone> BuildPolicy<K> for AdaptivePolicy<K> {
    fn with_capacity(size: usize) -> Self {
        Self::new(size)
    }
}

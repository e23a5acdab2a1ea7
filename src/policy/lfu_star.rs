use crate::policy::{BuildPolicy, LFUPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;

/// `LFUStarPolicy` is an [`LFUPolicy`] that only evicts keys which were
/// never touched after insertion.
///
/// Once every tracked key has a count above 1, there is no victim and a
/// full cache refuses new entries with [`CacheError::CacheFull`].
///
/// [`LFUPolicy`]: struct.LFUPolicy.html
///
/// # Example
/// ```rust
/// use policy_caches::policy::{LFUStarPolicy, Policy};
///
/// let mut p = LFUStarPolicy::new();
/// p.insert(&1).unwrap();
/// p.insert(&2).unwrap();
/// p.touch(&1);
/// assert_eq!(p.victim().into_option(), Some(2));
///
/// p.touch(&2);
/// assert!(!p.victim().is_initialized());
/// ```
#[derive(Clone)]
pub struct LFUStarPolicy<K> {
    inner: LFUPolicy<K>,
}

impl<K: Hash + Eq + Clone> LFUStarPolicy<K> {
    /// Creates an empty `LFUStarPolicy`.
    pub fn new() -> Self {
        Self {
            inner: LFUPolicy::new(),
        }
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.frequency(key)
    }
}

impl<K: Hash + Eq + Clone> Default for LFUStarPolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq + Clone> Policy<K> for LFUStarPolicy<K> {
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
        self.inner.buckets().first_with_count(1).cloned().into()
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
        PolicyKind::LfuStar
    }
}

impl<K: Hash + Eq + Clone> BuildPolicy<K> for LFUStarPolicy<K> {
    fn with_capacity(size: usize) -> Self {
        Self {
            inner: LFUPolicy::with_capacity(size),
        }
    }
}

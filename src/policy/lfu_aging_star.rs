use crate::policy::{BuildPolicy, Clock, LFUAgingPolicy, MonotonicClock, Policy, PolicyKind};
use crate::{CacheError, Victim};
use core::hash::Hash;
use core::time::Duration;

/// `LFUAgingStarPolicy` combines [`LFUStarPolicy`] with the decay of
/// [`LFUAgingPolicy`].
///
/// Only keys at an access count of 1 are evicted, but counts of keys left
/// untouched for longer than the aging interval drop over time, so a cache
/// that is full of popular entries opens up again.
///
/// [`LFUStarPolicy`]: struct.LFUStarPolicy.html
/// [`LFUAgingPolicy`]: struct.LFUAgingPolicy.html
#[derive(Clone)]
pub struct LFUAgingStarPolicy<K, C = MonotonicClock> {
    inner: LFUAgingPolicy<K, C>,
}

impl<K: Ord + Hash + Clone> LFUAgingStarPolicy<K> {
    /// Creates an empty `LFUAgingStarPolicy` with the given aging interval.
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, MonotonicClock::new())
    }
}

impl<K: Ord + Hash + Clone, C: Clock> LFUAgingStarPolicy<K, C> {
    /// Creates an empty `LFUAgingStarPolicy` reading time from `clock`.
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        Self {
            inner: LFUAgingPolicy::with_clock(interval, clock),
        }
    }

    /// Returns the aging interval.
    pub fn interval(&self) -> Duration {
        self.inner.interval()
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.inner.frequency(key)
    }
}

impl<K: Ord + Hash + Clone, C: Clock> Policy<K> for LFUAgingStarPolicy<K, C> {
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
        self.inner.swept().first_with_count(1).cloned().into()
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
        PolicyKind::LfuAgingStar(self.inner.interval())
    }
}

impl<K: Ord + Hash + Clone, C: Clock + Default> BuildPolicy<K> for LFUAgingStarPolicy<K, C> {
    fn with_capacity(size: usize) -> Self {
        Self {
            inner: LFUAgingPolicy::with_capacity(size),
        }
    }
}

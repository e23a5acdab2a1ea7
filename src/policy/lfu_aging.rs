use crate::ds::FrequencyBuckets;
use crate::policy::{BuildPolicy, Clock, MonotonicClock, Policy, PolicyKind};
use crate::{CacheError, Victim};
use alloc::collections::BTreeMap;
use core::hash::Hash;
use core::time::Duration;
use log::trace;

/// The aging interval used when a policy is built from the cache capacity
/// alone: one hour.
pub const DEFAULT_AGING_INTERVAL: Duration = Duration::from_secs(3600);

/// Last-touch bookkeeping shared by the aging policies.
///
/// Only touched keys carry a stamp. A key whose stamp is older than
/// `interval` loses one access count per sweep, and is stamped again if it
/// is still above 1. `oldest` is a lower bound of the live stamps, so a
/// sweep that cannot find anything to age is skipped.
#[derive(Clone)]
pub(crate) struct Aging<K, C> {
    interval: Duration,
    stamps: BTreeMap<K, Duration>,
    oldest: Duration,
    clock: C,
}

impl<K: Ord + Hash + Clone, C: Clock> Aging<K, C> {
    pub(crate) fn new(interval: Duration, clock: C) -> Self {
        let oldest = clock.now();
        Self {
            interval,
            stamps: BTreeMap::new(),
            oldest,
            clock,
        }
    }

    #[inline]
    pub(crate) fn interval(&self) -> Duration {
        self.interval
    }

    pub(crate) fn touched(&mut self, key: &K) {
        let now = self.clock.now();
        self.stamps.insert(key.clone(), now);
    }

    pub(crate) fn forget(&mut self, key: &K) {
        self.stamps.remove(key);
    }

    pub(crate) fn clear(&mut self) {
        self.stamps.clear();
        self.oldest = self.clock.now();
    }

    /// Decays every key that was not touched within the interval.
    pub(crate) fn sweep(&mut self, freq: &mut FrequencyBuckets<K>) {
        let now = self.clock.now();
        if !self.expired(self.oldest, now) {
            return;
        }

        let interval = self.interval;
        let oldest = &mut self.oldest;
        *oldest = now;
        let before = self.stamps.len();
        self.stamps.retain(|key, stamp| {
            let expired = stamp.checked_add(interval).map_or(false, |t| t < now);
            if !expired {
                if *stamp < *oldest {
                    *oldest = *stamp;
                }
                return true;
            }

            match freq.decrement(key) {
                Some(count) if count > 1 => {
                    *stamp = now;
                    true
                }
                _ => false,
            }
        });
        trace!(
            "policy_caches: aging sweep done, {} of {} stamped keys back at the floor",
            before - self.stamps.len(),
            before
        );
    }

    #[inline]
    fn expired(&self, stamp: Duration, now: Duration) -> bool {
        stamp
            .checked_add(self.interval)
            .map_or(false, |deadline| deadline < now)
    }
}

/// `LFUAgingPolicy` is an [`LFUPolicy`] whose access counts decay.
///
/// Whenever a victim is requested and a touched key has not been touched
/// again for longer than the aging interval, its count drops by one (never
/// below 1). Entries that were popular long ago eventually become evictable
/// again.
///
/// Time comes from a [`Clock`], [`MonotonicClock`] by default.
///
/// [`LFUPolicy`]: struct.LFUPolicy.html
///
/// # Example
/// ```rust
/// use core::time::Duration;
/// use policy_caches::policy::{LFUAgingPolicy, Policy, PolicyKind};
///
/// let mut p = LFUAgingPolicy::new(Duration::from_secs(60));
/// p.insert(&1).unwrap();
/// p.insert(&2).unwrap();
/// p.touch(&1);
///
/// assert_eq!(p.victim().into_option(), Some(2));
/// assert_eq!(p.kind(), PolicyKind::LfuAging(Duration::from_secs(60)));
/// ```
#[derive(Clone)]
pub struct LFUAgingPolicy<K, C = MonotonicClock> {
    freq: FrequencyBuckets<K>,
    aging: Aging<K, C>,
}

impl<K: Ord + Hash + Clone> LFUAgingPolicy<K> {
    /// Creates an empty `LFUAgingPolicy` with the given aging interval.
    pub fn new(interval: Duration) -> Self {
        Self::with_clock(interval, MonotonicClock::new())
    }
}

impl<K: Ord + Hash + Clone, C: Clock> LFUAgingPolicy<K, C> {
    /// Creates an empty `LFUAgingPolicy` reading time from `clock`.
    pub fn with_clock(interval: Duration, clock: C) -> Self {
        Self {
            freq: FrequencyBuckets::new(),
            aging: Aging::new(interval, clock),
        }
    }

    /// Returns the aging interval.
    pub fn interval(&self) -> Duration {
        self.aging.interval()
    }

    /// Returns the access count of `key`.
    pub fn frequency(&self, key: &K) -> Option<u64> {
        self.freq.count(key)
    }

    /// Ages the stale keys and returns the buckets to pick a victim from.
    pub(crate) fn swept(&mut self) -> &FrequencyBuckets<K> {
        self.aging.sweep(&mut self.freq);
        &self.freq
    }
}

impl<K: Ord + Hash + Clone, C: Clock> Policy<K> for LFUAgingPolicy<K, C> {
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        if self.freq.insert(key.clone()) {
            Ok(())
        } else {
            Err(CacheError::InvalidKey(key.clone()))
        }
    }

    fn remove(&mut self, key: &K) {
        self.aging.forget(key);
        self.freq.remove(key);
    }

    fn touch(&mut self, key: &K) {
        if self.freq.increment(key).is_some() {
            self.aging.touched(key);
        }
    }

    fn clear(&mut self) {
        self.aging.clear();
        self.freq.clear();
    }

    fn victim(&mut self) -> Victim<K> {
        self.swept().min().cloned().into()
    }

    fn contains(&self, key: &K) -> bool {
        self.freq.contains(key)
    }

    fn len(&self) -> usize {
        self.freq.len()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::LfuAging(self.aging.interval())
    }
}

impl<K: Ord + Hash + Clone, C: Clock + Default> BuildPolicy<K> for LFUAgingPolicy<K, C> {
    fn with_capacity(size: usize) -> Self {
        Self {
            freq: FrequencyBuckets::with_capacity(size),
            aging: Aging::new(DEFAULT_AGING_INTERVAL, C::default()),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::policy::clock::ManualClock;
    use crate::policy::{
        BuildPolicy, LFUAgingPolicy, LFUPolicy, Policy, PolicyKind, DEFAULT_AGING_INTERVAL,
    };
    use crate::Victim;
    use core::time::Duration;

    #[test]
    fn test_no_aging_within_interval() {
        let clock = ManualClock::default();
        let mut p = LFUAgingPolicy::with_clock(Duration::from_secs(1), clock.clone());
        for k in 1..=3 {
            p.insert(&k).unwrap();
        }
        p.touch(&1);
        p.touch(&2);

        clock.advance(Duration::from_millis(500));
        assert_eq!(p.victim(), Victim::new(3));
        assert_eq!(p.frequency(&1), Some(2));
    }

    #[test]
    fn test_expired_counts_decay() {
        let clock = ManualClock::default();
        let mut p = LFUAgingPolicy::with_clock(Duration::from_secs(1), clock.clone());
        for k in 1..=3 {
            p.insert(&k).unwrap();
        }
        // 1 -> 4, 2 -> 4, 3 -> 3
        for _ in 0..3 {
            p.touch(&1);
            p.touch(&2);
        }
        p.touch(&3);
        p.touch(&3);

        clock.advance(Duration::from_secs(2));
        assert_eq!(p.victim(), Victim::new(3));
        assert_eq!(p.frequency(&1), Some(3));
        assert_eq!(p.frequency(&3), Some(2));

        // the sweep is skipped until the interval passes again
        assert_eq!(p.victim(), Victim::new(3));
        assert_eq!(p.frequency(&1), Some(3));
    }

    #[test]
    fn test_aging_changes_the_victim() {
        let clock = ManualClock::default();
        let mut aging = LFUAgingPolicy::with_clock(Duration::from_secs(1), clock.clone());
        let mut plain = LFUPolicy::new();

        for p in [&mut aging as &mut dyn Policy<&str>, &mut plain] {
            p.insert(&"a").unwrap();
            p.insert(&"b").unwrap();
            p.touch(&"a");
            p.touch(&"a");
        }

        clock.advance(Duration::from_secs(2));
        // a: 3 -> 2, stamped again
        assert_eq!(aging.victim(), Victim::new("b"));
        assert_eq!(aging.frequency(&"a"), Some(2));

        clock.advance(Duration::from_millis(1500));
        aging.touch(&"b");
        plain.touch(&"b");

        clock.advance(Duration::from_millis(500));
        // a: 2 -> 1, b is still fresh at 2
        assert_eq!(aging.victim(), Victim::new("a"));
        assert_eq!(aging.frequency(&"a"), Some(1));
        assert_eq!(aging.frequency(&"b"), Some(2));
        // a: 3, b: 2
        assert_eq!(plain.victim(), Victim::new("b"));
    }

    #[test]
    fn test_untouched_keys_never_decay() {
        let clock = ManualClock::default();
        let mut p = LFUAgingPolicy::with_clock(Duration::from_secs(1), clock.clone());
        p.insert(&1).unwrap();
        p.insert(&2).unwrap();
        p.touch(&2);

        clock.advance(Duration::from_secs(5));
        assert_eq!(p.victim(), Victim::new(1));
        // 2 dropped to the floor and lost its stamp
        assert_eq!(p.frequency(&2), Some(1));
        assert!(p.aging.stamps.is_empty());

        p.remove(&1);
        assert_eq!(p.victim(), Victim::new(2));
    }

    #[test]
    fn test_remove_and_clear_forget_stamps() {
        let clock = ManualClock::default();
        let mut p = LFUAgingPolicy::with_clock(Duration::from_secs(1), clock.clone());
        p.insert(&1).unwrap();
        p.touch(&1);
        p.touch(&9);
        assert_eq!(p.aging.stamps.len(), 1);

        p.remove(&1);
        assert!(p.aging.stamps.is_empty());
        assert!(p.is_empty());

        p.insert(&2).unwrap();
        p.touch(&2);
        p.clear();
        assert!(p.aging.stamps.is_empty());
        assert_eq!(p.victim(), Victim::empty());
    }

    #[test]
    fn test_default_interval() {
        let p: LFUAgingPolicy<u32> = LFUAgingPolicy::with_capacity(8);
        assert_eq!(p.interval(), DEFAULT_AGING_INTERVAL);
        assert_eq!(p.kind(), PolicyKind::LfuAging(DEFAULT_AGING_INTERVAL));
    }
}

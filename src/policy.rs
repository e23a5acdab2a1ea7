//! Replacement policies.
//!
//! A policy only tracks keys. It never sees values and never evicts anything
//! by itself: the [`Cache`] asks it for a [`Victim`] when it runs out of
//! room, erases that entry, and tells the policy to forget the key.
//!
//! [`Cache`]: ../struct.Cache.html
//! [`Victim`]: ../struct.Victim.html
mod adaptive;
mod lfu;
mod lfu_star;
mod lru;
mod mru;
mod none;

pub use crate::ds::Keys;
pub use adaptive::AdaptivePolicy;
pub use lfu::LFUPolicy;
pub use lfu_star::LFUStarPolicy;
pub use lru::LRUPolicy;
pub use mru::MRUPolicy;
pub use none::NonePolicy;

cfg_std! {
    mod clock;
    mod lfu_aging;
    mod lfu_aging_star;

    pub use clock::{Clock, MonotonicClock};
    pub use lfu_aging::{LFUAgingPolicy, DEFAULT_AGING_INTERVAL};
    pub use lfu_aging_star::LFUAgingStarPolicy;
}

use crate::{CacheError, Victim};
use alloc::boxed::Box;
use core::time::Duration;

/// Identifies a policy and the part of its configuration that changes its
/// behavior. Two caches can only be swapped when their kinds are equal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    /// [`NonePolicy`]
    None,
    /// [`LRUPolicy`]
    Lru,
    /// [`MRUPolicy`]
    Mru,
    /// [`LFUPolicy`]
    Lfu,
    /// [`LFUStarPolicy`]
    LfuStar,
    /// `LFUAgingPolicy` with its aging interval
    LfuAging(Duration),
    /// `LFUAgingStarPolicy` with its aging interval
    LfuAgingStar(Duration),
    /// [`AdaptivePolicy`]
    Adaptive,
    /// A user-defined policy, told apart by the given tag.
    Custom(&'static str),
}

/// `Policy` decides which key a full cache should give up.
///
/// The cache drives a policy through these calls, always while holding its
/// write lock:
/// - `insert` when a new entry is stored,
/// - `touch` when an entry is read, checked or overwritten,
/// - `remove` when an entry is erased (by the user or by eviction),
/// - `victim` when room is needed.
///
/// A policy must never propose a key it does not track, and `len` must
/// always equal the number of keys it currently tracks as resident.
pub trait Policy<K> {
    /// Starts tracking `key`.
    ///
    /// A policy refuses a key it already tracks with
    /// [`CacheError::InvalidKey`], and leaves its state unchanged in that
    /// case.
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>>;

    /// Stops tracking `key`. Unknown keys are ignored.
    fn remove(&mut self, key: &K);

    /// Records an access to `key`. Unknown keys are ignored.
    fn touch(&mut self, key: &K);

    /// Forgets every key.
    fn clear(&mut self);

    /// Proposes the next key to evict, without forgetting it.
    ///
    /// This takes `&mut self` so that a policy may reorganize itself (for
    /// example, age its counters) before answering.
    fn victim(&mut self) -> Victim<K>;

    /// Returns `true` if `key` is tracked as resident.
    fn contains(&self, key: &K) -> bool;

    /// Returns the number of keys tracked as resident.
    fn len(&self) -> usize;

    /// Returns `true` if no key is tracked as resident.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the kind of this policy.
    fn kind(&self) -> PolicyKind;
}

/// A [`Policy`] that can be built from the cache capacity alone.
pub trait BuildPolicy<K>: Policy<K> + Sized {
    /// Creates an empty policy for a cache holding at most `size` entries.
    fn with_capacity(size: usize) -> Self;
}

impl<K, P: Policy<K> + ?Sized> Policy<K> for Box<P> {
    #[inline]
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        (**self).insert(key)
    }

    #[inline]
    fn remove(&mut self, key: &K) {
        (**self).remove(key)
    }

    #[inline]
    fn touch(&mut self, key: &K) {
        (**self).touch(key)
    }

    #[inline]
    fn clear(&mut self) {
        (**self).clear()
    }

    #[inline]
    fn victim(&mut self) -> Victim<K> {
        (**self).victim()
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        (**self).contains(key)
    }

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    #[inline]
    fn kind(&self) -> PolicyKind {
        (**self).kind()
    }
}

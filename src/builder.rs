use crate::lock::{LockNone, Locking};
use crate::policy::BuildPolicy;
use crate::{Cache, CacheError};
use core::marker::PhantomData;

/// `CacheBuilder` is used to help build a [`Cache`] with custom configurations.
///
/// The policy type `P` is picked by [`set_policy`] or inferred from the cache
/// type. When no policy instance is given, one is built from the size.
///
/// # Example
/// ```rust
/// use policy_caches::lock::LockExclusive;
/// use policy_caches::policy::{AdaptivePolicy, LRUPolicy};
/// use policy_caches::{Cache, CacheBuilder};
///
/// let cache: Cache<u64, u64, LRUPolicy<u64>> = CacheBuilder::new(10).finalize().unwrap();
/// assert_eq!(cache.max_size(), 10);
///
/// let cache: Cache<u64, u64, _, LockExclusive> = CacheBuilder::new(10)
///     .set_size(20)
///     .set_policy(AdaptivePolicy::new(20))
///     .set_lock::<LockExclusive>()
///     .finalize()
///     .unwrap();
/// assert_eq!(cache.max_size(), 20);
/// ```
///
/// [`Cache`]: struct.Cache.html
/// [`set_policy`]: struct.CacheBuilder.html#method.set_policy
pub struct CacheBuilder<P, L = LockNone> {
    size: usize,
    policy: Option<P>,
    marker: PhantomData<L>,
}

impl<P> CacheBuilder<P> {
    /// Returns a builder for a cache of `size` entries, without locking.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            policy: None,
            marker: PhantomData,
        }
    }
}

impl<P, L: Locking> CacheBuilder<P, L> {
    /// Set the cache size
    pub fn set_size(self, size: usize) -> Self {
        Self {
            size,
            policy: self.policy,
            marker: PhantomData,
        }
    }

    /// Set the policy instance the cache will drive
    pub fn set_policy(self, policy: P) -> Self {
        Self {
            size: self.size,
            policy: Some(policy),
            marker: PhantomData,
        }
    }

    /// Set the locking strategy
    pub fn set_lock<NL: Locking>(self) -> CacheBuilder<P, NL> {
        CacheBuilder {
            size: self.size,
            policy: self.policy,
            marker: PhantomData,
        }
    }

    /// Finalize the builder to [`Cache`]
    ///
    /// [`Cache`]: struct.Cache.html
    pub fn finalize<K, V>(self) -> Result<Cache<K, V, P, L>, CacheError<K>>
    where
        K: Ord + Clone,
        P: BuildPolicy<K>,
    {
        let policy = match self.policy {
            Some(policy) => policy,
            None => P::with_capacity(self.size),
        };
        Cache::with_policy(self.size, policy)
    }
}

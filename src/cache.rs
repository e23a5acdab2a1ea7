use crate::lock::{LockCell, LockNone, Locking};
use crate::policy::{BuildPolicy, Policy};
use crate::CacheError;
use alloc::collections::{btree_map, BTreeMap};
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use core::mem;
use core::ops::Deref;
use log::{debug, trace, warn};

/// Everything a cache guards with its lock.
#[derive(Clone)]
pub(crate) struct Inner<K, V, P> {
    storage: BTreeMap<K, V>,
    policy: P,
    curr_entries: usize,
}

impl<K: Ord + Clone, V, P: Policy<K>> Inner<K, V, P> {
    fn new(policy: P) -> Self {
        Self {
            storage: BTreeMap::new(),
            policy,
            curr_entries: 0,
        }
    }

    fn insert(&mut self, key: K, value: V, max_entries: usize) -> Result<bool, CacheError<K>> {
        if self.storage.contains_key(&key) {
            return Ok(false);
        }
        if self.policy.contains(&key) {
            return Err(CacheError::InvalidKey(key));
        }

        while self.curr_entries >= max_entries {
            match self.policy.victim().into_option() {
                Some(victim) => {
                    self.erase(&victim);
                    debug!(
                        "policy_caches: evicted one entry, {} of {} in use",
                        self.curr_entries, max_entries
                    );
                }
                None => {
                    warn!(
                        "policy_caches: cache of {} entries is full and the policy has no victim",
                        max_entries
                    );
                    return Err(CacheError::CacheFull);
                }
            }
        }

        self.policy.insert(&key)?;
        self.storage.insert(key, value);
        self.curr_entries += 1;
        Ok(true)
    }

    fn erase(&mut self, key: &K) -> usize {
        let removed = usize::from(self.storage.remove(key).is_some());
        self.policy.remove(key);
        self.curr_entries -= removed;
        removed
    }

    fn check(&mut self, key: &K) -> bool {
        self.policy.touch(key);
        self.storage.contains_key(key)
    }

    fn clear(&mut self) {
        self.storage.clear();
        self.policy.clear();
        self.curr_entries = 0;
    }
}

type WriteGuard<'a, K, V, P, L> =
    <<L as Locking>::Cell<Inner<K, V, P>> as LockCell<Inner<K, V, P>>>::WriteGuard<'a>;

/// `Cache` is a map that holds at most `max_size` entries and asks its
/// [`Policy`] which entry to give up when it runs out of room.
///
/// Every operation takes the cache lock exactly once, so each one is atomic
/// with respect to the others. The locking strategy `L` is one of
/// [`LockNone`] (the default), [`LockExclusive`] or [`LockShared`].
///
/// [`Policy`]: policy/trait.Policy.html
/// [`LockNone`]: lock/struct.LockNone.html
/// [`LockExclusive`]: lock/struct.LockExclusive.html
/// [`LockShared`]: lock/struct.LockShared.html
///
/// # Example
/// ```rust
/// use policy_caches::policy::LRUPolicy;
/// use policy_caches::Cache;
///
/// let cache: Cache<u64, &str, LRUPolicy<u64>> = Cache::new(2).unwrap();
/// cache.insert(1, "one").unwrap();
/// cache.insert(2, "two").unwrap();
///
/// // 1 becomes the most recently used entry
/// assert_eq!(*cache.fetch(&1).unwrap(), "one");
///
/// // so 2 makes room for 3
/// assert!(cache.insert(3, "three").unwrap());
/// assert_eq!(cache.count(&2), 0);
/// assert_eq!(cache.len(), 2);
/// ```
pub struct Cache<K, V, P, L: Locking = LockNone> {
    inner: L::Cell<Inner<K, V, P>>,
    max_entries: usize,
}

impl<K: Ord + Clone, V, P: BuildPolicy<K>, L: Locking> Cache<K, V, P, L> {
    /// Creates a cache holding at most `size` entries, with a policy built
    /// from that size.
    ///
    /// A size of zero is rejected with [`CacheError::InvalidSize`].
    pub fn new(size: usize) -> Result<Self, CacheError<K>> {
        Self::with_policy(size, P::with_capacity(size))
    }
}

impl<K: Ord + Clone, V, P: Policy<K>, L: Locking> Cache<K, V, P, L> {
    /// Creates a cache holding at most `size` entries and driving `policy`.
    ///
    /// The cache starts empty, so any key `policy` already tracks is
    /// cleared. Its configuration is kept. A size of zero is rejected with
    /// [`CacheError::InvalidSize`].
    ///
    /// # Example
    /// ```rust
    /// use core::time::Duration;
    /// use policy_caches::lock::LockShared;
    /// use policy_caches::policy::LFUAgingPolicy;
    /// use policy_caches::Cache;
    ///
    /// let policy = LFUAgingPolicy::new(Duration::from_secs(30));
    /// let cache: Cache<String, u32, _, LockShared> = Cache::with_policy(16, policy).unwrap();
    /// assert_eq!(cache.max_size(), 16);
    /// ```
    pub fn with_policy(size: usize, mut policy: P) -> Result<Self, CacheError<K>> {
        if size == 0 {
            return Err(CacheError::InvalidSize(0));
        }
        policy.clear();
        Ok(Self {
            inner: <L::Cell<Inner<K, V, P>> as LockCell<Inner<K, V, P>>>::new(Inner::new(policy)),
            max_entries: size,
        })
    }

    /// Inserts `value` under `key`.
    ///
    /// Returns `Ok(true)` if the entry was stored, evicting policy victims
    /// first when the cache is full. Returns `Ok(false)` and changes nothing
    /// if `key` is already present. Fails with [`CacheError::CacheFull`] if
    /// room is needed and the policy has no victim, or with
    /// [`CacheError::InvalidKey`] if the policy refuses the key.
    pub fn insert(&self, key: K, value: V) -> Result<bool, CacheError<K>> {
        self.inner.write().insert(key, value, self.max_entries)
    }

    /// Inserts `value` under `key`, or overwrites the present value and
    /// touches the key.
    ///
    /// Returns `Ok(true)` on insertion and `Ok(false)` on assignment.
    pub fn insert_or_assign(&self, key: K, value: V) -> Result<bool, CacheError<K>> {
        let mut guard = self.inner.write();
        let inner = &mut *guard;
        match inner.storage.get_mut(&key) {
            Some(slot) => {
                *slot = value;
                inner.policy.touch(&key);
                Ok(false)
            }
            None => inner.insert(key, value, self.max_entries),
        }
    }

    /// Touches `key` and returns a guard dereferencing to its value.
    ///
    /// The cache stays locked while the returned [`ValueRef`] is alive.
    /// Fails with [`CacheError::InvalidKey`] if `key` is not present.
    pub fn fetch(&self, key: &K) -> Result<ValueRef<'_, K, V, P, L>, CacheError<K>> {
        self.get(key).ok_or_else(|| CacheError::InvalidKey(key.clone()))
    }

    /// Touches `key` and returns a guard dereferencing to its value, or
    /// `None` if `key` is not present.
    pub fn get(&self, key: &K) -> Option<ValueRef<'_, K, V, P, L>> {
        let mut guard = self.inner.write();
        if !guard.check(key) {
            return None;
        }
        Some(ValueRef {
            guard,
            key: key.clone(),
        })
    }

    /// Touches `key` and returns a guard to its value, inserting
    /// `V::default()` first if `key` is not present.
    pub fn get_or_insert_default(&self, key: K) -> Result<ValueRef<'_, K, V, P, L>, CacheError<K>>
    where
        V: Default,
    {
        let mut guard = self.inner.write();
        if !guard.check(&key) {
            guard.insert(key.clone(), V::default(), self.max_entries)?;
        }
        Ok(ValueRef { guard, key })
    }

    /// Touches `key` and returns whether it is present.
    pub fn check(&self, key: &K) -> bool {
        self.inner.write().check(key)
    }

    /// Records an access to `key` without reading it.
    pub fn touch(&self, key: &K) {
        self.inner.write().policy.touch(key);
    }

    /// Removes `key`. Returns the number of entries removed, 0 or 1.
    pub fn erase(&self, key: &K) -> usize {
        self.inner.write().erase(key)
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner.write().clear();
        trace!("policy_caches: cache cleared");
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().curr_entries
    }

    /// Returns `true` if the cache holds no entry.
    pub fn is_empty(&self) -> bool {
        self.inner.read().storage.is_empty()
    }

    /// Returns the capacity.
    #[inline]
    pub fn max_size(&self) -> usize {
        self.max_entries
    }

    /// Returns 1 if `key` is present and 0 otherwise, without touching it.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.inner.read().storage.contains_key(key))
    }

    /// Returns a snapshot of the keys, in key order, without touching them.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().storage.keys().cloned().collect()
    }

    /// Runs `f` on the policy under the read lock.
    pub fn inspect_policy<R>(&self, f: impl FnOnce(&P) -> R) -> R {
        f(&self.inner.read().policy)
    }

    /// Runs `f` on the stored keys, in key order, and the policy, both seen
    /// under one read lock.
    ///
    /// # Example
    /// ```rust
    /// use policy_caches::policy::{LFUPolicy, Policy};
    /// use policy_caches::Cache;
    ///
    /// let cache: Cache<u8, u8, LFUPolicy<u8>> = Cache::new(4).unwrap();
    /// cache.insert(1, 10).unwrap();
    /// cache.insert(2, 20).unwrap();
    ///
    /// let in_sync = cache.inspect(|mut keys, policy| keys.all(|k| policy.contains(k)));
    /// assert!(in_sync);
    /// ```
    pub fn inspect<R>(&self, f: impl FnOnce(btree_map::Keys<'_, K, V>, &P) -> R) -> R {
        let inner = self.inner.read();
        f(inner.storage.keys(), &inner.policy)
    }

    /// Copies every entry of `other` into this cache.
    ///
    /// `other` is snapshotted under its read lock first. Entries already
    /// present here are touched and keep their value, the others are
    /// inserted one at a time and may evict entries of this cache.
    pub fn merge(&self, other: &Self) -> Result<(), CacheError<K>>
    where
        V: Clone,
    {
        let entries: Vec<(K, V)> = other
            .inner
            .read()
            .storage
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        for (key, value) in entries {
            let mut guard = self.inner.write();
            if !guard.check(&key) {
                guard.insert(key, value, self.max_entries)?;
            }
        }
        Ok(())
    }

    /// Exchanges the content and capacity of two caches.
    ///
    /// Fails with [`CacheError::IncompatiblePolicy`] and leaves both caches
    /// alone if their policies differ in kind or configuration.
    pub fn swap(&mut self, other: &mut Self) -> Result<(), CacheError<K>> {
        let this = self.inner.get_mut();
        let that = other.inner.get_mut();
        if this.policy.kind() != that.policy.kind() {
            return Err(CacheError::IncompatiblePolicy);
        }
        mem::swap(this, that);
        mem::swap(&mut self.max_entries, &mut other.max_entries);
        Ok(())
    }

    /// Consumes the cache and returns its entries in key order.
    pub fn into_entries(self) -> Vec<(K, V)> {
        self.inner.into_inner().storage.into_iter().collect()
    }
}

impl<K: Clone, V: Clone, P: Clone, L: Locking> Clone for Cache<K, V, P, L> {
    fn clone(&self) -> Self {
        let inner = (*self.inner.read()).clone();
        Self {
            inner: <L::Cell<Inner<K, V, P>> as LockCell<Inner<K, V, P>>>::new(inner),
            max_entries: self.max_entries,
        }
    }
}

impl<K: Debug, V: Debug, P, L: Locking> Debug for Cache<K, V, P, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("Cache")
            .field("max_size", &self.max_entries)
            .field("entries", &inner.storage)
            .finish()
    }
}

/// A locked view of one cache entry, returned by [`Cache::fetch`],
/// [`Cache::get`] and [`Cache::get_or_insert_default`].
///
/// It holds the cache's write lock. Drop it before calling into the same
/// cache again.
pub struct ValueRef<'a, K: 'a, V: 'a, P: 'a, L: Locking + 'a> {
    guard: WriteGuard<'a, K, V, P, L>,
    key: K,
}

impl<'a, K: 'a, V: 'a, P: 'a, L: Locking + 'a> ValueRef<'a, K, V, P, L> {
    /// Returns the key of the entry.
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<'a, K: Ord + 'a, V: 'a, P: 'a, L: Locking + 'a> Deref for ValueRef<'a, K, V, P, L> {
    type Target = V;

    fn deref(&self) -> &V {
        match self.guard.storage.get(&self.key) {
            Some(v) => v,
            // a `ValueRef` is only built from the write guard under which `key`
            // was found, and erasing needs that same lock
            None => unreachable!("policy_caches: locked entry vanished"),
        }
    }
}

impl<'a, K: Ord + Debug + 'a, V: Debug + 'a, P: 'a, L: Locking + 'a> Debug for ValueRef<'a, K, V, P, L> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("ValueRef")
            .field(&self.key)
            .field(&**self)
            .finish()
    }
}

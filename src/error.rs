use core::fmt::{Debug, Display, Formatter};

/// `CacheError` is the errors of this crate.
///
/// `K` is the key type of the cache, so a rejected key can be handed back
/// to the caller.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CacheError<K> {
    /// The key was refused by the policy, or it was requested but is not
    /// in the cache.
    InvalidKey(K),
    /// The cache is full and the policy has no entry it is willing to evict.
    CacheFull,
    /// An empty [`Victim`] was dereferenced.
    ///
    /// [`Victim`]: struct.Victim.html
    EmptyVictim,
    /// Two caches with different policies (or differently configured
    /// policies) were swapped.
    IncompatiblePolicy,
    /// Invalid cache size
    InvalidSize(usize),
}

impl<K> CacheError<K> {
    /// Returns the offending key of an [`CacheError::InvalidKey`].
    pub fn key(&self) -> Option<&K> {
        match self {
            CacheError::InvalidKey(k) => Some(k),
            _ => None,
        }
    }

    /// Consumes the error and returns the offending key, if any.
    pub fn into_key(self) -> Option<K> {
        match self {
            CacheError::InvalidKey(k) => Some(k),
            _ => None,
        }
    }

    /// Returns `true` if this error is [`CacheError::CacheFull`].
    pub fn is_cache_full(&self) -> bool {
        matches!(self, CacheError::CacheFull)
    }

    /// Returns `true` if this error is [`CacheError::InvalidKey`].
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, CacheError::InvalidKey(_))
    }
}

impl<K: Debug> Display for CacheError<K> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            CacheError::InvalidKey(k) => write!(f, "invalid key {:?}", k),
            CacheError::CacheFull => write!(
                f,
                "the cache is full and no entry can be evicted at the moment, remove some entries manually"
            ),
            CacheError::EmptyVictim => write!(f, "tried to access an empty victim"),
            CacheError::IncompatiblePolicy => {
                write!(f, "attempted to swap caches with incompatible policies")
            }
            CacheError::InvalidSize(size) => write!(f, "invalid cache size {}", *size),
        }
    }
}

#[cfg(feature = "std")]
impl<K: Debug> std::error::Error for CacheError<K> {}

use crate::CacheError;

/// `Victim` is what a [`Policy`] answers when asked which key should be
/// evicted next: either a key, or nothing at all.
///
/// A victim is only a proposal. The policy keeps tracking the key until the
/// cache actually removes it.
///
/// # Example
/// ```rust
/// use policy_caches::{CacheError, Victim};
///
/// let victim = Victim::new(1);
/// assert!(victim.is_initialized());
/// assert_eq!(victim.value(), Ok(&1));
///
/// let empty: Victim<u64> = Victim::empty();
/// assert!(!empty.is_initialized());
/// assert_eq!(empty.value(), Err(CacheError::EmptyVictim));
/// ```
///
/// [`Policy`]: policy/trait.Policy.html
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Victim<K>(Option<K>);

impl<K> Victim<K> {
    /// Creates a victim holding `key`.
    #[inline]
    pub fn new(key: K) -> Self {
        Self(Some(key))
    }

    /// Creates a victim that holds nothing.
    #[inline]
    pub fn empty() -> Self {
        Self(None)
    }

    /// Returns `true` if the victim holds a key.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.0.is_some()
    }

    /// Returns the held key, or [`CacheError::EmptyVictim`] if there is none.
    #[inline]
    pub fn value(&self) -> Result<&K, CacheError<K>> {
        self.0.as_ref().ok_or(CacheError::EmptyVictim)
    }

    /// Consumes the victim and returns the held key, or
    /// [`CacheError::EmptyVictim`] if there is none.
    #[inline]
    pub fn into_value(self) -> Result<K, CacheError<K>> {
        self.0.ok_or(CacheError::EmptyVictim)
    }

    /// Returns the held key as an `Option`.
    #[inline]
    pub fn as_option(&self) -> Option<&K> {
        self.0.as_ref()
    }

    /// Converts the victim into an `Option`.
    #[inline]
    pub fn into_option(self) -> Option<K> {
        self.0
    }
}

impl<K> Default for Victim<K> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<K> From<Option<K>> for Victim<K> {
    fn from(key: Option<K>) -> Self {
        Self(key)
    }
}

impl<K> From<Victim<K>> for Option<K> {
    fn from(victim: Victim<K>) -> Self {
        victim.0
    }
}

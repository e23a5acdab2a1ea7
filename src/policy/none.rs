use crate::policy::{BuildPolicy, Policy, PolicyKind};
use crate::{CacheError, Victim};
use alloc::collections::BTreeSet;

/// `NonePolicy` keeps no usage information at all.
///
/// Its victim is simply the greatest tracked key, which makes eviction
/// deterministic and independent of the access pattern.
///
/// # Example
/// ```rust
/// use policy_caches::policy::{NonePolicy, Policy};
///
/// let mut p = NonePolicy::new();
/// p.insert(&2).unwrap();
/// p.insert(&7).unwrap();
/// p.insert(&4).unwrap();
/// p.touch(&7);
/// assert_eq!(p.victim().into_option(), Some(7));
/// ```
#[derive(Clone, Debug)]
pub struct NonePolicy<K> {
    entries: BTreeSet<K>,
}

impl<K: Ord + Clone> NonePolicy<K> {
    /// Creates an empty `NonePolicy`.
    pub fn new() -> Self {
        Self {
            entries: BTreeSet::new(),
        }
    }
}

impl<K: Ord + Clone> Default for NonePolicy<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone> Policy<K> for NonePolicy<K> {
    fn insert(&mut self, key: &K) -> Result<(), CacheError<K>> {
        if self.entries.insert(key.clone()) {
            Ok(())
        } else {
            Err(CacheError::InvalidKey(key.clone()))
        }
    }

    fn remove(&mut self, key: &K) {
        self.entries.remove(key);
    }

    fn touch(&mut self, _key: &K) {}

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn victim(&mut self) -> Victim<K> {
        self.entries.iter().next_back().cloned().into()
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains(key)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn kind(&self) -> PolicyKind {
        PolicyKind::None
    }
}

impl<K: Ord + Clone> BuildPolicy<K> for NonePolicy<K> {
    fn with_capacity(_size: usize) -> Self {
        Self::new()
    }
}

//! Capacity-bounded key/value caches with pluggable replacement policies and
//! pluggable locking (support `no_std`).
//!
//! A [`Cache`] stores at most `max_size` entries. When it is full, it asks
//! its [`Policy`] for a [`Victim`], erases that entry, and only then stores
//! the new one. Policies available out of the box:
//!
//! | policy                 | evicts                                              |
//! |------------------------|-----------------------------------------------------|
//! | [`NonePolicy`]         | the greatest key                                    |
//! | [`LRUPolicy`]          | the least recently used key                         |
//! | [`MRUPolicy`]          | the most recently used key                          |
//! | [`LFUPolicy`]          | the least frequently used key                       |
//! | [`LFUStarPolicy`]      | a key that was never touched, or nothing            |
//! | `LFUAgingPolicy`       | like LFU, with counts decaying over time (`std`)    |
//! | `LFUAgingStarPolicy`   | like LFU*, with counts decaying over time (`std`)   |
//! | [`AdaptivePolicy`]     | adaptive replacement (ARC)                          |
//!
//! Locking is picked by a type parameter: [`LockNone`] (single thread),
//! `LockExclusive` or `LockShared` (both `std`, backed by `parking_lot`).
//!
//! # Example
//! ```rust
//! use policy_caches::policy::LFUStarPolicy;
//! use policy_caches::{Cache, CacheError};
//!
//! let cache: Cache<&str, u32, LFUStarPolicy<&str>> = Cache::new(2).unwrap();
//! cache.insert("a", 1).unwrap();
//! cache.insert("b", 2).unwrap();
//! cache.touch(&"a");
//! cache.touch(&"b");
//!
//! // every entry has been used again, LFU* refuses to evict any of them
//! assert_eq!(cache.insert("c", 3), Err(CacheError::CacheFull));
//!
//! cache.erase(&"a");
//! assert_eq!(cache.insert("c", 3), Ok(true));
//! ```
//!
//! [`NonePolicy`]: policy/struct.NonePolicy.html
//! [`LRUPolicy`]: policy/struct.LRUPolicy.html
//! [`MRUPolicy`]: policy/struct.MRUPolicy.html
//! [`LFUPolicy`]: policy/struct.LFUPolicy.html
//! [`LFUStarPolicy`]: policy/struct.LFUStarPolicy.html
//! [`AdaptivePolicy`]: policy/struct.AdaptivePolicy.html
//! [`Policy`]: policy/trait.Policy.html
//! [`LockNone`]: lock/struct.LockNone.html
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
extern crate alloc;
#[cfg(feature = "hashbrown")]
extern crate hashbrown;

#[cfg(any(test, feature = "std", not(feature = "hashbrown")))]
extern crate std;

#[macro_use]
mod macros;

mod builder;
mod cache;
mod ds;
mod error;
pub mod lock;
pub mod policy;
mod victim;

pub use builder::CacheBuilder;
pub use cache::{Cache, ValueRef};
pub use error::CacheError;
pub use policy::{BuildPolicy, Policy, PolicyKind};
pub use victim::Victim;

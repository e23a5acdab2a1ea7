//! Locking strategies for [`Cache`].
//!
//! A cache keeps all of its state in a single cell and reaches it through a
//! read guard (for pure queries) or a write guard (for everything that may
//! touch the policy). The strategy decides what those guards are:
//!
//! | strategy          | cell                  | concurrent readers | `Sync` |
//! |-------------------|-----------------------|--------------------|--------|
//! | [`LockNone`]      | `RefCell`             | n/a                | no     |
//! | [`LockExclusive`] | `parking_lot::Mutex`  | no                 | yes    |
//! | [`LockShared`]    | `parking_lot::RwLock` | yes                | yes    |
//!
//! Fetching a value counts as an access for every policy but `NonePolicy`,
//! so it takes the write guard even under [`LockShared`].
//!
//! [`Cache`]: ../struct.Cache.html
use core::cell::{Ref, RefCell, RefMut};
use core::ops::{Deref, DerefMut};

/// A cell guarding a value of type `T`.
pub trait LockCell<T> {
    /// Guard returned by [`LockCell::read`].
    type ReadGuard<'a>: Deref<Target = T>
    where
        Self: 'a;

    /// Guard returned by [`LockCell::write`].
    type WriteGuard<'a>: DerefMut<Target = T>
    where
        Self: 'a;

    /// Wraps `value`.
    fn new(value: T) -> Self;

    /// Acquires shared access.
    fn read(&self) -> Self::ReadGuard<'_>;

    /// Acquires exclusive access.
    fn write(&self) -> Self::WriteGuard<'_>;

    /// Borrows the value through a unique reference, without locking.
    fn get_mut(&mut self) -> &mut T;

    /// Unwraps the value.
    fn into_inner(self) -> T;
}

/// A locking strategy: picks the [`LockCell`] a cache stores its state in.
pub trait Locking {
    /// The cell type.
    type Cell<T>: LockCell<T>;
}

/// No locking at all. The cache is `!Sync` and must stay on one thread.
///
/// Re-entering the cache while a [`ValueRef`] is alive panics.
///
/// [`ValueRef`]: ../struct.ValueRef.html
#[derive(Debug, Copy, Clone, Default)]
pub struct LockNone;

impl Locking for LockNone {
    type Cell<T> = NoneCell<T>;
}

/// The cell of [`LockNone`].
#[derive(Debug, Default)]
pub struct NoneCell<T>(RefCell<T>);

impl<T> LockCell<T> for NoneCell<T> {
    type ReadGuard<'a> = Ref<'a, T> where Self: 'a;
    type WriteGuard<'a> = RefMut<'a, T> where Self: 'a;

    #[inline]
    fn new(value: T) -> Self {
        Self(RefCell::new(value))
    }

    #[inline]
    fn read(&self) -> Self::ReadGuard<'_> {
        self.0.borrow()
    }

    #[inline]
    fn write(&self) -> Self::WriteGuard<'_> {
        self.0.borrow_mut()
    }

    #[inline]
    fn get_mut(&mut self) -> &mut T {
        self.0.get_mut()
    }

    #[inline]
    fn into_inner(self) -> T {
        self.0.into_inner()
    }
}

cfg_std! {
    /// One thread at a time, readers included.
    #[derive(Debug, Copy, Clone, Default)]
    pub struct LockExclusive;

    impl Locking for LockExclusive {
        type Cell<T> = ExclusiveCell<T>;
    }

    /// The cell of [`LockExclusive`].
    #[derive(Debug, Default)]
    pub struct ExclusiveCell<T>(parking_lot::Mutex<T>);

    impl<T> LockCell<T> for ExclusiveCell<T> {
        type ReadGuard<'a> = parking_lot::MutexGuard<'a, T> where Self: 'a;
        type WriteGuard<'a> = parking_lot::MutexGuard<'a, T> where Self: 'a;

        #[inline]
        fn new(value: T) -> Self {
            Self(parking_lot::Mutex::new(value))
        }

        #[inline]
        fn read(&self) -> Self::ReadGuard<'_> {
            self.0.lock()
        }

        #[inline]
        fn write(&self) -> Self::WriteGuard<'_> {
            self.0.lock()
        }

        #[inline]
        fn get_mut(&mut self) -> &mut T {
            self.0.get_mut()
        }

        #[inline]
        fn into_inner(self) -> T {
            self.0.into_inner()
        }
    }

    /// Many concurrent readers or a single writer.
    #[derive(Debug, Copy, Clone, Default)]
    pub struct LockShared;

    impl Locking for LockShared {
        type Cell<T> = SharedCell<T>;
    }

    /// The cell of [`LockShared`].
    #[derive(Debug, Default)]
    pub struct SharedCell<T>(parking_lot::RwLock<T>);

    impl<T> LockCell<T> for SharedCell<T> {
        type ReadGuard<'a> = parking_lot::RwLockReadGuard<'a, T> where Self: 'a;
        type WriteGuard<'a> = parking_lot::RwLockWriteGuard<'a, T> where Self: 'a;

        #[inline]
        fn new(value: T) -> Self {
            Self(parking_lot::RwLock::new(value))
        }

        #[inline]
        fn read(&self) -> Self::ReadGuard<'_> {
            self.0.read()
        }

        #[inline]
        fn write(&self) -> Self::WriteGuard<'_> {
            self.0.write()
        }

        #[inline]
        fn get_mut(&mut self) -> &mut T {
            self.0.get_mut()
        }

        #[inline]
        fn into_inner(self) -> T {
            self.0.into_inner()
        }
    }
}

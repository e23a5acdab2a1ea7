use core::time::Duration;
use std::time::Instant;

/// A source of monotonic time for the aging policies.
///
/// `now` is measured from an arbitrary, fixed origin and must never go
/// backwards.
pub trait Clock {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

/// The default [`Clock`], backed by [`std::time::Instant`].
#[derive(Debug, Copy, Clone)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    /// Creates a clock whose origin is the current instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn now(&self) -> Duration {
        (**self).now()
    }
}

#[cfg(test)]
mod test {
    use super::{Clock, MonotonicClock};

    #[test]
    fn test_monotonic_clock() {
        let clock = MonotonicClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}

#[cfg(test)]
pub(crate) use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use core::cell::Cell;
    use core::time::Duration;
    use std::rc::Rc;

    /// A clock that only moves when told to. Clones share the same time.
    #[derive(Clone, Default)]
    pub(crate) struct ManualClock(Rc<Cell<Duration>>);

    impl ManualClock {
        pub(crate) fn advance(&self, by: Duration) {
            self.0.set(self.0.get() + by);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Duration {
            self.0.get()
        }
    }
}

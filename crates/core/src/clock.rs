// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock abstraction so time-based flush triggers can be tested deterministically.

use std::time::Instant;

/// Source of monotonic time
pub trait Clock: Clone + Send + Sync + 'static {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::Clock;
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    /// Manually advanced clock for tests
    #[derive(Clone, Debug)]
    pub struct FakeClock {
        now: Arc<Mutex<Instant>>,
    }

    impl Default for FakeClock {
        fn default() -> Self {
            Self {
                now: Arc::new(Mutex::new(Instant::now())),
            }
        }
    }

    impl FakeClock {
        pub fn new() -> Self {
            Self::default()
        }

        /// Move the clock forward by `by`
        pub fn advance(&self, by: Duration) {
            let mut now = self.now.lock();
            *now += by;
        }
    }

    impl Clock for FakeClock {
        fn now(&self) -> Instant {
            *self.now.lock()
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeClock;

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;

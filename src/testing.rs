//! In-memory helpers for exercising telemetry plumbing in tests.
//!
//! Compiled for this crate's own tests and for downstream test harnesses
//! opting in through the `testing` feature. Nothing here is part of the
//! stable interface.

use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use crate::metrics::Clock;

/// A clock that only moves when told to.
///
/// Clones share the same instant, so a test can hold one handle while the
/// meter state under test holds another.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Arc<Mutex<SystemTime>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: SystemTime) -> Self {
        ManualClock {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by `step`.
    pub fn advance(&self, step: Duration) {
        let mut now = self.now.lock().expect("manual clock poisoned");
        *now += step;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> SystemTime {
        *self.now.lock().expect("manual clock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use std::time::UNIX_EPOCH;

    use super::*;

    #[test]
    fn advances_only_when_told() {
        let clock = ManualClock::new(UNIX_EPOCH);
        assert_eq!(clock.now(), UNIX_EPOCH);

        clock.advance(Duration::from_secs(5));
        assert_eq!(clock.now(), UNIX_EPOCH + Duration::from_secs(5));

        let shared = clock.clone();
        shared.advance(Duration::from_secs(1));
        assert_eq!(clock.now(), UNIX_EPOCH + Duration::from_secs(6));
    }
}

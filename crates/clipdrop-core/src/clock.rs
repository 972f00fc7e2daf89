use jiff::Timestamp;
use std::time::{Duration, SystemTime};

pub trait Clock: Send + Sync + 'static {
    /// Returns the current time of the clock
    fn now(&self) -> Timestamp;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Returns how long before `now` the filesystem time `then` lies.
///
/// Times in the future count as zero elapsed. Returns `None` when `then`
/// cannot be represented as a [`Timestamp`].
pub fn elapsed_since(now: Timestamp, then: SystemTime) -> Option<Duration> {
    let then = Timestamp::try_from(then).ok()?;
    let elapsed = now.duration_since(then);
    if elapsed.is_negative() {
        Some(Duration::ZERO)
    } else {
        Some(elapsed.unsigned_abs())
    }
}

#[cfg(any(test, feature = "test-util"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-util"))]
mod manual {
    use super::Clock;
    use jiff::{SignedDuration, Timestamp};
    use std::sync::{Arc, Mutex};

    /// A clock that only moves when told to.
    #[derive(Clone)]
    pub struct ManualClock {
        inner: Arc<Mutex<Timestamp>>,
    }

    impl ManualClock {
        pub fn new(now: Timestamp) -> Self {
            Self {
                inner: Arc::new(Mutex::new(now)),
            }
        }

        pub fn advance(&self, by: SignedDuration) {
            let mut now = self
                .inner
                .lock()
                .expect("manual clock lock should not be poisoned");
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Timestamp {
            *self
                .inner
                .lock()
                .expect("manual clock lock should not be poisoned")
        }
    }
}

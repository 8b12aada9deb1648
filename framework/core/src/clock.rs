use std::cell::Cell;
use std::time::Duration;

/// Source of wall-clock time and the blocking delay between polls.
///
/// The poller only ever observes time through this trait so that a run can be simulated without
/// waiting for real time to pass.
pub trait Clock {
    /// Current time as whole seconds since the Unix epoch.
    fn now_s(&self) -> i64;

    /// Block the calling thread for `duration`.
    fn sleep(&self, duration: Duration);
}

/// The real clock, backed by the system time and [std::thread::sleep].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_s(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// A clock that only moves when it is told to.
///
/// Sleeping advances the clock by the requested duration and returns immediately. Use
/// [ManualClock::advance] to simulate time spent elsewhere, such as a slow request.
#[derive(Debug)]
pub struct ManualClock {
    now_s: Cell<i64>,
    sleeps: Cell<usize>,
}

impl ManualClock {
    pub fn new(start_s: i64) -> Self {
        Self {
            now_s: Cell::new(start_s),
            sleeps: Cell::new(0),
        }
    }

    /// Move the clock forward by `secs` without counting it as a sleep.
    pub fn advance(&self, secs: i64) {
        self.now_s.set(self.now_s.get() + secs);
    }

    /// Number of times [Clock::sleep] has been called.
    pub fn sleep_count(&self) -> usize {
        self.sleeps.get()
    }
}

impl Clock for ManualClock {
    fn now_s(&self) -> i64 {
        self.now_s.get()
    }

    fn sleep(&self, duration: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
        self.advance(duration.as_secs() as i64);
    }
}

use chrono::{DateTime, Utc};

/// Source of wall-clock time for the tracker and the Pomodoro.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// The real system clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Whole seconds between `start` and `now`, floored, never negative.
pub fn whole_seconds_between(start: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    let millis = now.signed_duration_since(start).num_milliseconds();
    if millis <= 0 {
        0
    } else {
        (millis / 1000) as u64
    }
}

#[cfg(test)]
pub use manual::ManualClock;

#[cfg(test)]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::cell::Cell;
    use std::rc::Rc;

    /// Virtual clock for tests. Clones share the same instant.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        now: Rc<Cell<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            let start = Utc.with_ymd_and_hms(2024, 3, 4, 9, 0, 0).unwrap();
            Self {
                now: Rc::new(Cell::new(start)),
            }
        }

        pub fn advance_secs(&self, secs: i64) {
            self.now.set(self.now.get() + Duration::seconds(secs));
        }

        pub fn advance_millis(&self, millis: i64) {
            self.now.set(self.now.get() + Duration::milliseconds(millis));
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            self.now.get()
        }
    }
}

use chrono::{DateTime, Duration, Utc};

/// Default event poll interval in milliseconds
pub const DEFAULT_POLL_MS: u64 = 250;

/// Period of the tracker tick in seconds
pub const TICK_PERIOD_SECS: i64 = 1;

/// Get the event poll duration
pub fn poll_duration() -> std::time::Duration {
    std::time::Duration::from_millis(DEFAULT_POLL_MS)
}

/// A recurring tick source driven by an external clock.
///
/// At most one schedule exists at a time: arming an armed ticker does nothing
/// and disarming is idempotent.
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next_due: Option<DateTime<Utc>>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn every_second() -> Self {
        Self::new(Duration::seconds(TICK_PERIOD_SECS))
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first tick one period after `now`. Returns false if
    /// already armed.
    pub fn arm(&mut self, now: DateTime<Utc>) -> bool {
        if self.next_due.is_some() {
            return false;
        }
        self.next_due = Some(now + self.period);
        true
    }

    /// Cancel the schedule. Returns false if nothing was scheduled.
    pub fn disarm(&mut self) -> bool {
        self.next_due.take().is_some()
    }

    /// Number of ticks that came due up to `now`, advancing the schedule past them
    pub fn due_ticks(&mut self, now: DateTime<Utc>) -> u64 {
        let Some(due) = self.next_due else {
            return 0;
        };
        if now < due {
            return 0;
        }

        let period_ms = self.period.num_milliseconds().max(1);
        let late_ms = now.signed_duration_since(due).num_milliseconds();
        let count = 1 + late_ms / period_ms;
        self.next_due = Some(due + Duration::milliseconds(count * period_ms));
        count as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_duration() {
        assert_eq!(poll_duration(), std::time::Duration::from_millis(250));
    }

    #[test]
    fn test_unarmed_ticker_never_fires() {
        let mut ticker = Ticker::every_second();
        assert_eq!(ticker.due_ticks(Utc::now() + Duration::seconds(10)), 0);
    }

    #[test]
    fn test_ticks_once_per_period() {
        let start = Utc::now();
        let mut ticker = Ticker::every_second();
        assert!(ticker.arm(start));

        assert_eq!(ticker.due_ticks(start + Duration::milliseconds(999)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::seconds(1)), 1);
        assert_eq!(ticker.due_ticks(start + Duration::milliseconds(1500)), 0);
        assert_eq!(ticker.due_ticks(start + Duration::seconds(2)), 1);
    }

    #[test]
    fn test_late_poll_reports_missed_ticks() {
        let start = Utc::now();
        let mut ticker = Ticker::every_second();
        ticker.arm(start);

        assert_eq!(ticker.due_ticks(start + Duration::milliseconds(3500)), 3);
        assert_eq!(ticker.due_ticks(start + Duration::seconds(4)), 1);
    }

    #[test]
    fn test_arm_is_not_doubled() {
        let start = Utc::now();
        let mut ticker = Ticker::every_second();
        assert!(ticker.arm(start));
        assert!(!ticker.arm(start + Duration::milliseconds(500)));

        // Still on the first schedule
        assert_eq!(ticker.due_ticks(start + Duration::seconds(1)), 1);
    }

    #[test]
    fn test_disarm_is_idempotent() {
        let mut ticker = Ticker::every_second();
        ticker.arm(Utc::now());
        assert!(ticker.disarm());
        assert!(!ticker.disarm());
        assert!(!ticker.is_armed());
    }
}

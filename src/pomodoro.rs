use crate::domain::PomodoroPhase;
use chrono::{DateTime, Duration, Utc};

/// Phase change reported to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroEvent {
    BreakStarted,
    WorkStarted,
}

impl PomodoroEvent {
    fn entering(phase: PomodoroPhase) -> Self {
        match phase {
            PomodoroPhase::Work => PomodoroEvent::WorkStarted,
            PomodoroPhase::Break => PomodoroEvent::BreakStarted,
        }
    }
}

/// Work/break countdown. While running the deadline is held as an instant;
/// while paused the remaining seconds are frozen.
#[derive(Debug, Clone)]
pub struct Pomodoro {
    phase: PomodoroPhase,
    work_secs: u64,
    break_secs: u64,
    remaining_secs: u64,
    ends_at: Option<DateTime<Utc>>,
    completed_work_sessions: u32,
}

impl Pomodoro {
    pub fn new(work_minutes: u32, break_minutes: u32) -> Self {
        let work_secs = minutes_to_secs(work_minutes);
        Self {
            phase: PomodoroPhase::Work,
            work_secs,
            break_secs: minutes_to_secs(break_minutes),
            remaining_secs: work_secs,
            ends_at: None,
            completed_work_sessions: 0,
        }
    }

    pub fn phase(&self) -> PomodoroPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.ends_at.is_some()
    }

    pub fn completed_work_sessions(&self) -> u32 {
        self.completed_work_sessions
    }

    fn phase_secs(&self, phase: PomodoroPhase) -> u64 {
        match phase {
            PomodoroPhase::Work => self.work_secs,
            PomodoroPhase::Break => self.break_secs,
        }
    }

    /// Seconds left in the current phase, rounded up
    pub fn remaining(&self, now: DateTime<Utc>) -> u64 {
        match self.ends_at {
            Some(ends_at) => {
                let millis = (ends_at - now).num_milliseconds().max(0) as u64;
                millis.div_ceil(1000)
            }
            None => self.remaining_secs,
        }
    }

    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.ends_at.is_none() {
            self.ends_at = Some(now + Duration::seconds(self.remaining_secs as i64));
            tracing::debug!(phase = self.phase.name(), "pomodoro started");
        }
    }

    pub fn pause(&mut self, now: DateTime<Utc>) {
        if self.ends_at.is_some() {
            self.remaining_secs = self.remaining(now);
            self.ends_at = None;
            tracing::debug!(phase = self.phase.name(), remaining = self.remaining_secs, "pomodoro paused");
        }
    }

    pub fn toggle(&mut self, now: DateTime<Utc>) {
        if self.is_running() {
            self.pause(now);
        } else {
            self.start(now);
        }
    }

    /// Stop and return to a full work phase. Reports `WorkStarted` when
    /// leaving a break.
    pub fn reset(&mut self) -> Option<PomodoroEvent> {
        let was_break = self.phase == PomodoroPhase::Break;
        self.phase = PomodoroPhase::Work;
        self.remaining_secs = self.work_secs;
        self.ends_at = None;
        tracing::info!("pomodoro reset");
        was_break.then_some(PomodoroEvent::WorkStarted)
    }

    /// Jump to the next phase without counting a finished work session.
    /// Keeps running if it was running.
    pub fn skip(&mut self, now: DateTime<Utc>) -> PomodoroEvent {
        self.enter(self.phase.next(), now)
    }

    /// Switch phase if the countdown reached zero
    pub fn advance(&mut self, now: DateTime<Utc>) -> Option<PomodoroEvent> {
        let ends_at = self.ends_at?;
        if now < ends_at {
            return None;
        }

        if self.phase == PomodoroPhase::Work {
            self.completed_work_sessions += 1;
        }
        Some(self.enter(self.phase.next(), now))
    }

    fn enter(&mut self, phase: PomodoroPhase, now: DateTime<Utc>) -> PomodoroEvent {
        self.phase = phase;
        self.remaining_secs = self.phase_secs(phase);
        if self.ends_at.is_some() {
            self.ends_at = Some(now + Duration::seconds(self.remaining_secs as i64));
        }
        tracing::info!(
            phase = phase.name(),
            completed = self.completed_work_sessions,
            "pomodoro phase changed"
        );
        PomodoroEvent::entering(phase)
    }

    /// Apply new durations. A paused countdown restarts its phase with the
    /// new length; a running one keeps its deadline.
    pub fn set_durations(&mut self, work_minutes: u32, break_minutes: u32) {
        self.work_secs = minutes_to_secs(work_minutes);
        self.break_secs = minutes_to_secs(break_minutes);
        if self.ends_at.is_none() {
            self.remaining_secs = self.phase_secs(self.phase);
        }
    }
}

fn minutes_to_secs(minutes: u32) -> u64 {
    u64::from(minutes.max(1)) * 60
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, ManualClock};

    #[test]
    fn test_new_is_paused_work() {
        let pomodoro = Pomodoro::new(25, 5);
        let now = Utc::now();
        assert_eq!(pomodoro.phase(), PomodoroPhase::Work);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.remaining(now), 25 * 60);
    }

    #[test]
    fn test_countdown_runs_from_clock() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(25, 5);
        pomodoro.start(clock.now());

        clock.advance_secs(1);
        assert_eq!(pomodoro.remaining(clock.now()), 25 * 60 - 1);
        clock.advance_millis(300);
        assert_eq!(pomodoro.remaining(clock.now()), 25 * 60 - 1);
    }

    #[test]
    fn test_pause_freezes_remaining() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(25, 5);
        pomodoro.start(clock.now());
        clock.advance_secs(60);
        pomodoro.pause(clock.now());

        clock.advance_secs(600);
        assert_eq!(pomodoro.remaining(clock.now()), 24 * 60);

        pomodoro.toggle(clock.now());
        assert!(pomodoro.is_running());
        clock.advance_secs(30);
        assert_eq!(pomodoro.remaining(clock.now()), 24 * 60 - 30);
    }

    #[test]
    fn test_work_end_starts_break() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(1, 1);
        pomodoro.start(clock.now());

        clock.advance_secs(59);
        assert_eq!(pomodoro.advance(clock.now()), None);
        clock.advance_secs(1);
        assert_eq!(pomodoro.advance(clock.now()), Some(PomodoroEvent::BreakStarted));

        assert_eq!(pomodoro.phase(), PomodoroPhase::Break);
        assert_eq!(pomodoro.completed_work_sessions(), 1);
        assert!(pomodoro.is_running());
        assert_eq!(pomodoro.remaining(clock.now()), 60);

        clock.advance_secs(60);
        assert_eq!(pomodoro.advance(clock.now()), Some(PomodoroEvent::WorkStarted));
        assert_eq!(pomodoro.completed_work_sessions(), 1);
    }

    #[test]
    fn test_paused_countdown_never_advances() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(1, 1);
        clock.advance_secs(3600);
        assert_eq!(pomodoro.advance(clock.now()), None);
    }

    #[test]
    fn test_skip_does_not_count_session() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(25, 5);

        assert_eq!(pomodoro.skip(clock.now()), PomodoroEvent::BreakStarted);
        assert_eq!(pomodoro.phase(), PomodoroPhase::Break);
        assert_eq!(pomodoro.remaining(clock.now()), 5 * 60);
        assert_eq!(pomodoro.completed_work_sessions(), 0);
        assert!(!pomodoro.is_running());
    }

    #[test]
    fn test_reset() {
        let clock = ManualClock::new();
        let mut pomodoro = Pomodoro::new(25, 5);
        pomodoro.start(clock.now());
        assert_eq!(pomodoro.reset(), None);

        pomodoro.skip(clock.now());
        assert_eq!(pomodoro.reset(), Some(PomodoroEvent::WorkStarted));
        assert_eq!(pomodoro.phase(), PomodoroPhase::Work);
        assert!(!pomodoro.is_running());
        assert_eq!(pomodoro.remaining(clock.now()), 25 * 60);
    }

    #[test]
    fn test_set_durations_while_paused() {
        let mut pomodoro = Pomodoro::new(25, 5);
        pomodoro.set_durations(50, 10);
        assert_eq!(pomodoro.remaining(Utc::now()), 50 * 60);
    }

    #[test]
    fn test_zero_minutes_clamped() {
        let pomodoro = Pomodoro::new(0, 0);
        assert_eq!(pomodoro.remaining(Utc::now()), 60);
    }
}

use crate::clock::whole_seconds_between;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique task identifier. UUIDv7, so ids created later sort after earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A trackable unit of work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    /// Display name, never empty after trimming
    pub name: String,
    /// Seconds already banked
    pub accumulated_secs: u64,
    /// Whether the timer is running
    pub active: bool,
    /// When the running session began; set iff `active`
    pub started_at: Option<DateTime<Utc>>,
    pub completed: bool,
}

impl Task {
    pub fn new(name: String) -> Self {
        Self {
            id: TaskId::generate(),
            name,
            accumulated_secs: 0,
            active: false,
            started_at: None,
            completed: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active && self.started_at.is_some()
    }

    /// Whole seconds since the running session began (0 when idle)
    pub fn session_elapsed(&self, now: DateTime<Utc>) -> u64 {
        match self.started_at {
            Some(started) if self.active => whole_seconds_between(started, now),
            _ => 0,
        }
    }

    /// idle -> running
    pub fn start(&mut self, now: DateTime<Utc>) {
        if !self.active {
            self.active = true;
            self.started_at = Some(now);
        }
    }

    /// running -> idle. Banks the session seconds not yet credited by ticks
    /// and returns how many seconds were added.
    pub fn stop(&mut self, now: DateTime<Utc>, credited_secs: u64) -> u64 {
        if !self.active {
            return 0;
        }
        let banked = self.session_elapsed(now).saturating_sub(credited_secs);
        self.accumulated_secs += banked;
        self.active = false;
        self.started_at = None;
        banked
    }

    /// Clear a running state left over from a previous process without banking.
    pub fn coerce_idle(&mut self) -> bool {
        let was_running = self.active || self.started_at.is_some();
        self.active = false;
        self.started_at = None;
        was_running
    }
}

/// The running session tracked by the timer engine: which task is running and
/// how many of its session seconds ticks have already credited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveSession {
    pub task_id: TaskId,
    pub credited_secs: u64,
}

impl LiveSession {
    pub fn new(task_id: TaskId) -> Self {
        Self {
            task_id,
            credited_secs: 0,
        }
    }
}

/// Total time for display: banked seconds plus live seconds not yet credited
pub fn total_time(task: &Task, session: Option<&LiveSession>, now: DateTime<Utc>) -> u64 {
    if !task.is_running() {
        return task.accumulated_secs;
    }
    let credited = session
        .filter(|s| s.task_id == task.id)
        .map_or(0, |s| s.credited_secs);
    task.accumulated_secs + task.session_elapsed(now).saturating_sub(credited)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_task_new() {
        let task = Task::new("Write report".to_string());
        assert_eq!(task.name, "Write report");
        assert_eq!(task.accumulated_secs, 0);
        assert!(!task.active);
        assert!(task.started_at.is_none());
        assert!(!task.completed);
    }

    #[test]
    fn test_ids_are_unique_and_ordered() {
        let first = TaskId::generate();
        let second = TaskId::generate();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn test_start_sets_started_at() {
        let now = Utc::now();
        let mut task = Task::new("Test".to_string());
        task.start(now);
        assert!(task.is_running());
        assert_eq!(task.started_at, Some(now));

        // Starting twice keeps the original session start
        task.start(now + Duration::seconds(10));
        assert_eq!(task.started_at, Some(now));
    }

    #[test]
    fn test_stop_banks_elapsed() {
        let now = Utc::now();
        let mut task = Task::new("Test".to_string());
        task.start(now);

        let banked = task.stop(now + Duration::milliseconds(125_900), 0);
        assert_eq!(banked, 125);
        assert_eq!(task.accumulated_secs, 125);
        assert!(!task.active);
        assert!(task.started_at.is_none());
    }

    #[test]
    fn test_stop_skips_credited_seconds() {
        let now = Utc::now();
        let mut task = Task::new("Test".to_string());
        task.start(now);
        task.accumulated_secs = 30;

        let banked = task.stop(now + Duration::seconds(32), 30);
        assert_eq!(banked, 2);
        assert_eq!(task.accumulated_secs, 32);
    }

    #[test]
    fn test_stop_when_idle_is_noop() {
        let mut task = Task::new("Test".to_string());
        assert_eq!(task.stop(Utc::now(), 0), 0);
        assert_eq!(task.accumulated_secs, 0);
    }

    #[test]
    fn test_coerce_idle() {
        let mut task = Task::new("Test".to_string());
        task.start(Utc::now());
        task.accumulated_secs = 12;

        assert!(task.coerce_idle());
        assert!(!task.active);
        assert!(task.started_at.is_none());
        assert_eq!(task.accumulated_secs, 12);
        assert!(!task.coerce_idle());
    }

    #[test]
    fn test_total_time_idle() {
        let mut task = Task::new("Test".to_string());
        task.accumulated_secs = 40;
        assert_eq!(total_time(&task, None, Utc::now()), 40);
    }

    #[test]
    fn test_total_time_running_without_session() {
        let now = Utc::now();
        let mut task = Task::new("Test".to_string());
        task.accumulated_secs = 40;
        task.start(now);
        assert_eq!(total_time(&task, None, now + Duration::seconds(20)), 60);
    }

    #[test]
    fn test_total_time_running_with_credited_session() {
        let now = Utc::now();
        let mut task = Task::new("Test".to_string());
        task.start(now);
        task.accumulated_secs = 15; // credited by ticks
        let session = LiveSession {
            task_id: task.id,
            credited_secs: 15,
        };
        assert_eq!(total_time(&task, Some(&session), now + Duration::seconds(17)), 17);
    }
}

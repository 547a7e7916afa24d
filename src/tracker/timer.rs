use crate::domain::{LiveSession, Task, TaskId};
use crate::persistence::DEFAULT_BREAK_INTERVAL_MINUTES;
use crate::ticker::Ticker;
use chrono::{DateTime, Utc};

/// A timer that was stopped and the seconds it banked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stopped {
    pub task_id: TaskId,
    pub banked_secs: u64,
}

/// Result of one tick
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickReport {
    /// Seconds credited to the running task by this tick
    pub credited_secs: u64,
    /// Set when this tick crossed the break threshold: (task id, task name)
    pub break_needed: Option<(TaskId, String)>,
}

/// Per-task idle/running state machine with the "one running task" rule,
/// the tick source and the break threshold.
#[derive(Debug, Clone)]
pub struct TimerEngine {
    session: Option<LiveSession>,
    ticker: Ticker,
    break_interval_minutes: u32,
    break_needed: bool,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(DEFAULT_BREAK_INTERVAL_MINUTES)
    }
}

impl TimerEngine {
    pub fn new(break_interval_minutes: u32) -> Self {
        Self {
            session: None,
            ticker: Ticker::every_second(),
            break_interval_minutes: sanitize_interval(break_interval_minutes),
            break_needed: false,
        }
    }

    pub fn session(&self) -> Option<&LiveSession> {
        self.session.as_ref()
    }

    pub fn running_task_id(&self) -> Option<TaskId> {
        self.session.map(|s| s.task_id)
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_armed()
    }

    pub fn break_interval_minutes(&self) -> u32 {
        self.break_interval_minutes
    }

    /// Non-positive intervals fall back to the default
    pub fn set_break_interval(&mut self, minutes: u32) {
        self.break_interval_minutes = sanitize_interval(minutes);
    }

    pub fn break_needed(&self) -> bool {
        self.break_needed
    }

    pub fn raise_break(&mut self) {
        self.break_needed = true;
    }

    pub fn clear_break(&mut self) {
        self.break_needed = false;
    }

    /// idle -> running for `id`, stopping any other running task first.
    /// Returns the stop performed on the previous task, if any.
    pub fn start(&mut self, tasks: &mut [Task], id: TaskId, now: DateTime<Utc>) -> Option<Stopped> {
        let target = tasks.iter().position(|t| t.id == id)?;
        if tasks[target].active {
            return None;
        }

        let previous = self.stop(tasks, now);

        tasks[target].start(now);
        self.session = Some(LiveSession::new(id));
        // New running identity: drop any old schedule before arming
        self.ticker.disarm();
        self.ticker.arm(now);

        previous
    }

    /// running -> idle for whichever task is running
    pub fn stop(&mut self, tasks: &mut [Task], now: DateTime<Utc>) -> Option<Stopped> {
        let session = self.session.take();
        self.ticker.disarm();

        let mut stopped = None;
        for task in tasks.iter_mut().filter(|t| t.active) {
            let credited = session
                .filter(|s| s.task_id == task.id)
                .map_or(0, |s| s.credited_secs);
            let banked_secs = task.stop(now, credited);
            stopped = Some(Stopped {
                task_id: task.id,
                banked_secs,
            });
        }
        stopped
    }

    /// Stop `id` only if it is the running task
    pub fn stop_task(&mut self, tasks: &mut [Task], id: TaskId, now: DateTime<Utc>) -> Option<Stopped> {
        let running = tasks.iter().any(|t| t.id == id && t.active);
        if running {
            self.stop(tasks, now)
        } else {
            None
        }
    }

    /// Stop `id` if running, otherwise start it
    pub fn toggle(&mut self, tasks: &mut [Task], id: TaskId, now: DateTime<Utc>) -> Option<Stopped> {
        let running = tasks.iter().any(|t| t.id == id && t.active);
        if running {
            self.stop(tasks, now)
        } else {
            self.start(tasks, id, now)
        }
    }

    /// Number of ticks the tick source says are due at `now`
    pub fn due_ticks(&mut self, now: DateTime<Utc>) -> u64 {
        self.ticker.due_ticks(now)
    }

    /// Credit the running task with every whole session second not yet
    /// credited, then check the break threshold against the session length.
    pub fn tick(&mut self, tasks: &mut [Task], now: DateTime<Utc>) -> TickReport {
        let mut report = TickReport::default();
        let Some(session) = self.session.as_mut() else {
            return report;
        };
        let Some(task) = tasks.iter_mut().find(|t| t.id == session.task_id && t.active) else {
            return report;
        };

        let elapsed = task.session_elapsed(now);
        let credit = elapsed.saturating_sub(session.credited_secs);
        task.accumulated_secs += credit;
        session.credited_secs += credit;
        report.credited_secs = credit;

        let threshold = u64::from(self.break_interval_minutes) * 60;
        if elapsed >= threshold && !self.break_needed {
            self.break_needed = true;
            report.break_needed = Some((task.id, task.name.clone()));
        }

        report
    }
}

fn sanitize_interval(minutes: u32) -> u32 {
    if minutes == 0 {
        DEFAULT_BREAK_INTERVAL_MINUTES
    } else {
        minutes
    }
}

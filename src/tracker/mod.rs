pub mod store;
pub mod timer;

pub use store::TaskStore;
pub use timer::{Stopped, TickReport, TimerEngine};

use crate::clock::Clock;
use crate::domain::{compute_stats, sorted_tasks, total_time, DashboardStats, Task, TaskId};
use crate::notifications::{notify_break_needed, Notifier};
use crate::persistence::StorageError;
use chrono::{DateTime, Utc};

/// The owned tracking state: task collection, timer engine, clock and
/// notifier. All task and timer operations go through here.
pub struct Tracker {
    store: TaskStore,
    engine: TimerEngine,
    clock: Box<dyn Clock>,
    notifier: Box<dyn Notifier>,
}

impl Tracker {
    pub fn new(
        store: TaskStore,
        break_interval_minutes: u32,
        clock: Box<dyn Clock>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            engine: TimerEngine::new(break_interval_minutes),
            clock,
            notifier,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    pub fn running_task(&self) -> Option<&Task> {
        self.store.running()
    }

    pub fn is_ticking(&self) -> bool {
        self.engine.is_ticking()
    }

    pub fn break_needed(&self) -> bool {
        self.engine.break_needed()
    }

    pub fn break_interval_minutes(&self) -> u32 {
        self.engine.break_interval_minutes()
    }

    pub fn set_break_interval(&mut self, minutes: u32) {
        self.engine.set_break_interval(minutes);
        tracing::info!(minutes = self.engine.break_interval_minutes(), "break interval set");
    }

    /// Hide the break banner; the signal may fire again on a later tick
    pub fn dismiss_break(&mut self) {
        self.engine.clear_break();
    }

    pub fn add(&mut self, name: &str) -> Result<Option<TaskId>, StorageError> {
        self.store.add(name)
    }

    pub fn rename(&mut self, id: TaskId, name: &str) -> Result<bool, StorageError> {
        self.store.rename(id, name)
    }

    /// Delete a task, banking its running time first
    pub fn delete(&mut self, id: TaskId) -> Result<Option<Task>, StorageError> {
        self.stop_task(id)?;
        self.store.remove(id)
    }

    /// Flip completion, stopping the task's timer first if it is running
    pub fn toggle_completion(&mut self, id: TaskId) -> Result<Option<bool>, StorageError> {
        self.stop_task(id)?;
        let completed = self.store.toggle_completed(id)?;
        if let Some(completed) = completed {
            tracing::info!(%id, completed, "task completion toggled");
        }
        Ok(completed)
    }

    pub fn start(&mut self, id: TaskId) -> Result<Option<Stopped>, StorageError> {
        if self.store.get(id).is_none() {
            return Ok(None);
        }
        let now = self.clock.now();
        let engine = &mut self.engine;
        let previous = self.store.update(|tasks| engine.start(tasks, id, now))?;
        log_stop(previous);
        tracing::info!(%id, "timer started");
        Ok(previous)
    }

    /// Stop whichever task is running
    pub fn stop(&mut self) -> Result<Option<Stopped>, StorageError> {
        if self.store.running().is_none() && self.engine.running_task_id().is_none() {
            return Ok(None);
        }
        let now = self.clock.now();
        let engine = &mut self.engine;
        let stopped = self.store.update(|tasks| engine.stop(tasks, now))?;
        log_stop(stopped);
        Ok(stopped)
    }

    fn stop_task(&mut self, id: TaskId) -> Result<Option<Stopped>, StorageError> {
        if !self.store.get(id).is_some_and(|t| t.active) {
            return Ok(None);
        }
        let now = self.clock.now();
        let engine = &mut self.engine;
        let stopped = self.store.update(|tasks| engine.stop_task(tasks, id, now))?;
        log_stop(stopped);
        Ok(stopped)
    }

    /// Stop `id` if it is running, otherwise start it
    pub fn toggle_timer(&mut self, id: TaskId) -> Result<Option<Stopped>, StorageError> {
        if self.store.get(id).is_none() {
            return Ok(None);
        }
        let now = self.clock.now();
        let engine = &mut self.engine;
        let stopped = self.store.update(|tasks| engine.toggle(tasks, id, now))?;
        log_stop(stopped);
        if self.engine.running_task_id() == Some(id) {
            tracing::info!(%id, "timer started");
        }
        Ok(stopped)
    }

    /// Run a tick if the tick source has one due. Returns the tick's report
    /// when one ran.
    pub fn poll(&mut self) -> Result<Option<TickReport>, StorageError> {
        let now = self.clock.now();
        if self.engine.due_ticks(now) == 0 {
            return Ok(None);
        }

        let engine = &mut self.engine;
        let report = self.store.apply(|tasks| engine.tick(tasks, now));

        // The break flag is already raised, so notify before a failed save
        // can return early.
        if let Some((id, name)) = &report.break_needed {
            let minutes = self.engine.break_interval_minutes();
            tracing::info!(%id, task = %name, minutes, "break threshold reached");
            notify_break_needed(self.notifier.as_ref(), name, minutes);
        }
        self.store.persist()?;
        Ok(Some(report))
    }

    /// Pomodoro break began: bank the running task and raise the break flag
    pub fn on_break_start(&mut self) -> Result<(), StorageError> {
        self.stop()?;
        self.engine.raise_break();
        Ok(())
    }

    /// Pomodoro work began: clear the break flag
    pub fn on_work_start(&mut self) {
        self.engine.clear_break();
    }

    /// Bank any running time and save, for process exit
    pub fn shutdown(&mut self) -> Result<(), StorageError> {
        self.stop()?;
        self.store.persist()
    }

    pub fn stats(&self) -> DashboardStats {
        compute_stats(self.store.tasks(), self.engine.session(), self.clock.now())
    }

    pub fn sorted_tasks(&self) -> Vec<&Task> {
        sorted_tasks(self.store.tasks())
    }

    /// Display total for one task
    pub fn total_time(&self, task: &Task) -> u64 {
        total_time(task, self.engine.session(), self.clock.now())
    }
}

fn log_stop(stopped: Option<Stopped>) {
    if let Some(stopped) = stopped {
        tracing::info!(id = %stopped.task_id, banked_secs = stopped.banked_secs, "timer stopped");
    }
}

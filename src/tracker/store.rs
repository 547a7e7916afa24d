use crate::domain::{Task, TaskId};
use crate::persistence::{StorageError, TaskRepository};

/// Ordered in-memory task collection backed by a repository.
///
/// Every mutation builds the new collection, replaces the current one and
/// saves it.
pub struct TaskStore {
    tasks: Vec<Task>,
    repo: Box<dyn TaskRepository>,
}

impl TaskStore {
    /// Rehydrate from the repository. Missing or unreadable state yields an
    /// empty collection; timers left running by a previous process are
    /// cleared without banking.
    pub fn open(repo: Box<dyn TaskRepository>) -> Self {
        let mut tasks = match repo.load() {
            Ok(Some(tasks)) => tasks,
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not load saved tasks, starting empty");
                Vec::new()
            }
        };

        let mut coerced = 0;
        for task in tasks.iter_mut() {
            if task.coerce_idle() {
                coerced += 1;
            }
        }
        if coerced > 0 {
            tracing::info!(coerced, "cleared timers left running by a previous session");
        }
        tracing::debug!(count = tasks.len(), "tasks loaded");

        Self { tasks, repo }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// The task whose timer is running, if any
    pub fn running(&self) -> Option<&Task> {
        self.tasks.iter().find(|t| t.active)
    }

    /// Apply `f` to a copy of the collection, then replace and save it
    pub fn update<R>(&mut self, f: impl FnOnce(&mut Vec<Task>) -> R) -> Result<R, StorageError> {
        let result = self.apply(f);
        self.persist()?;
        Ok(result)
    }

    /// Apply `f` to a copy of the collection and replace it without saving.
    /// Callers persist afterwards.
    pub fn apply<R>(&mut self, f: impl FnOnce(&mut Vec<Task>) -> R) -> R {
        let mut next = self.tasks.clone();
        let result = f(&mut next);
        self.tasks = next;
        result
    }

    pub fn persist(&self) -> Result<(), StorageError> {
        self.repo.save(&self.tasks)
    }

    /// Append a new idle task. Blank names are ignored.
    pub fn add(&mut self, name: &str) -> Result<Option<TaskId>, StorageError> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let task = Task::new(name.to_string());
        let id = task.id;
        self.update(|tasks| tasks.push(task))?;
        tracing::info!(%id, name, "task added");
        Ok(Some(id))
    }

    /// Replace a task's name. Blank names and unknown ids are ignored.
    pub fn rename(&mut self, id: TaskId, name: &str) -> Result<bool, StorageError> {
        let name = name.trim();
        if name.is_empty() || self.get(id).is_none() {
            return Ok(false);
        }

        self.update(|tasks| {
            if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
                task.name = name.to_string();
            }
        })?;
        tracing::info!(%id, name, "task renamed");
        Ok(true)
    }

    /// Remove a task as-is. Callers stop its timer first.
    pub fn remove(&mut self, id: TaskId) -> Result<Option<Task>, StorageError> {
        let Some(index) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(None);
        };
        let removed = self.update(|tasks| tasks.remove(index))?;
        tracing::info!(%id, name = %removed.name, "task deleted");
        Ok(Some(removed))
    }

    /// Flip the completion flag. Callers stop its timer first.
    pub fn toggle_completed(&mut self, id: TaskId) -> Result<Option<bool>, StorageError> {
        if self.get(id).is_none() {
            return Ok(None);
        }

        self.update(|tasks| {
            tasks.iter_mut().find(|t| t.id == id).map(|task| {
                task.completed = !task.completed;
                task.completed
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryRepository;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    fn create_test_store() -> (TaskStore, MemoryRepository) {
        let repo = MemoryRepository::default();
        (TaskStore::open(Box::new(repo.clone())), repo)
    }

    #[test]
    fn test_open_empty() {
        let (store, repo) = create_test_store();
        assert!(store.tasks().is_empty());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn test_open_corrupt_is_empty() {
        let repo = MemoryRepository::with_raw("[{\"broken\": ");
        let store = TaskStore::open(Box::new(repo));
        assert!(store.tasks().is_empty());
    }

    #[test]
    fn test_open_clears_leftover_running_timer() {
        let mut task = Task::new("Left running".to_string());
        task.accumulated_secs = 90;
        task.start(Utc::now());
        let repo = MemoryRepository::default();
        repo.save(&[task]).unwrap();

        let store = TaskStore::open(Box::new(repo));
        let loaded = &store.tasks()[0];
        assert!(!loaded.active);
        assert!(loaded.started_at.is_none());
        assert_eq!(loaded.accumulated_secs, 90);
    }

    #[test]
    fn test_open_clears_every_leftover_timer() {
        let mut first = Task::new("First".to_string());
        let mut second = Task::new("Second".to_string());
        first.start(Utc::now());
        second.start(Utc::now());
        let idle = Task::new("Idle".to_string());
        let repo = MemoryRepository::default();
        repo.save(&[first, idle, second]).unwrap();

        let store = TaskStore::open(Box::new(repo));
        assert_eq!(store.tasks().len(), 3);
        assert!(store.tasks().iter().all(|t| !t.active && t.started_at.is_none()));
        assert!(store.running().is_none());
    }

    #[test]
    fn test_apply_does_not_save() {
        let (mut store, repo) = create_test_store();
        store.add("Task").unwrap();

        store.apply(|tasks| tasks[0].accumulated_secs = 7);
        assert_eq!(store.tasks()[0].accumulated_secs, 7);
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn test_add_appends_and_persists() {
        let (mut store, repo) = create_test_store();

        let first = store.add("First").unwrap().unwrap();
        let second = store.add("Second").unwrap().unwrap();

        assert_eq!(store.tasks().len(), 2);
        assert_eq!(store.tasks()[0].id, first);
        assert_eq!(store.tasks()[1].id, second);
        assert_eq!(repo.save_count(), 2);
    }

    #[test]
    fn test_add_trims_name() {
        let (mut store, _repo) = create_test_store();
        store.add("  Padded  ").unwrap();
        assert_eq!(store.tasks()[0].name, "Padded");
    }

    #[test]
    fn test_add_blank_is_noop() {
        let (mut store, repo) = create_test_store();
        store.add("Keep").unwrap();
        let before = store.tasks().to_vec();

        assert_eq!(store.add("").unwrap(), None);
        assert_eq!(store.add("   \t").unwrap(), None);

        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn test_rename() {
        let (mut store, _repo) = create_test_store();
        let id = store.add("Old").unwrap().unwrap();
        store
            .update(|tasks| tasks[0].accumulated_secs = 42)
            .unwrap();

        assert!(store.rename(id, "New").unwrap());
        let task = store.get(id).unwrap();
        assert_eq!(task.name, "New");
        assert_eq!(task.accumulated_secs, 42);
    }

    #[test]
    fn test_rename_blank_is_noop() {
        let (mut store, repo) = create_test_store();
        let id = store.add("Name").unwrap().unwrap();
        let before = store.tasks().to_vec();

        assert!(!store.rename(id, "  ").unwrap());
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(repo.save_count(), 1);
    }

    #[test]
    fn test_remove() {
        let (mut store, _repo) = create_test_store();
        let a = store.add("A").unwrap().unwrap();
        let b = store.add("B").unwrap().unwrap();

        let removed = store.remove(a).unwrap().unwrap();
        assert_eq!(removed.name, "A");
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, b);
        assert!(store.remove(a).unwrap().is_none());
    }

    #[test]
    fn test_toggle_completed() {
        let (mut store, _repo) = create_test_store();
        let id = store.add("Task").unwrap().unwrap();

        assert_eq!(store.toggle_completed(id).unwrap(), Some(true));
        assert_eq!(store.toggle_completed(id).unwrap(), Some(false));
    }

    #[test]
    fn test_persisted_collection_reloads_identically() {
        let (mut store, repo) = create_test_store();
        store.add("One").unwrap();
        let id = store.add("Two").unwrap().unwrap();
        store.toggle_completed(id).unwrap();

        let reopened = TaskStore::open(Box::new(repo));
        assert_eq!(reopened.tasks(), store.tasks());
    }

    #[test]
    fn test_failed_save_is_reported() {
        let (mut store, repo) = create_test_store();
        repo.set_fail_saves(true);

        assert!(store.add("Task").is_err());
        // The in-memory collection stays authoritative
        assert_eq!(store.tasks().len(), 1);
    }
}

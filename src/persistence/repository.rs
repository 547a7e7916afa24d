use super::error::StorageError;
use super::files::{atomic_write, read_file};
use crate::domain::Task;
use std::path::PathBuf;

/// Key-value slot holding the whole task collection
pub trait TaskRepository {
    /// Load the saved collection, `None` when nothing was ever saved
    fn load(&self) -> Result<Option<Vec<Task>>, StorageError>;

    /// Replace the saved collection
    fn save(&self, tasks: &[Task]) -> Result<(), StorageError>;
}

/// Serialize a collection the way every repository stores it
pub fn encode_tasks(tasks: &[Task]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(tasks)?)
}

/// Parse a stored collection
pub fn decode_tasks(content: &str) -> Result<Vec<Task>, StorageError> {
    Ok(serde_json::from_str(content)?)
}

/// Stores the collection as a JSON array in a single file
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskRepository for JsonFileRepository {
    fn load(&self) -> Result<Option<Vec<Task>>, StorageError> {
        match read_file(&self.path)? {
            Some(content) if content.trim().is_empty() => Ok(None),
            Some(content) => decode_tasks(&content).map(Some),
            None => Ok(None),
        }
    }

    fn save(&self, tasks: &[Task]) -> Result<(), StorageError> {
        atomic_write(&self.path, &encode_tasks(tasks)?)
    }
}

#[cfg(test)]
pub use memory::MemoryRepository;

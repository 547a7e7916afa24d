use super::error::StorageError;
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of the data directory, both local and in the home directory
pub const DATA_DIR_NAME: &str = ".stint";

/// Get the data directory - an explicit override wins, then a local .stint
/// found from the current directory upwards, then ~/.stint
pub fn get_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let current_dir = env::current_dir().context("Could not determine current directory")?;
    if let Some(local_dir) = find_local_data_dir(&current_dir) {
        return Ok(local_dir);
    }

    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(DATA_DIR_NAME))
}

/// Find local .stint directory by walking up the directory tree
fn find_local_data_dir(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir;

    loop {
        let data_dir = current.join(DATA_DIR_NAME);
        if data_dir.is_dir() {
            return Some(data_dir);
        }

        current = current.parent()?;
    }
}

/// Ensure the data directory exists
pub fn ensure_data_dir(override_dir: Option<&Path>) -> Result<PathBuf> {
    let dir = get_data_dir(override_dir)?;
    if !dir.exists() {
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    Ok(dir)
}

/// Initialize a local .stint directory inside `parent`
pub fn init_local_data_dir(parent: &Path) -> Result<PathBuf> {
    let data_dir = parent.join(DATA_DIR_NAME);

    if data_dir.exists() {
        anyhow::bail!("Data directory already exists: {}", data_dir.display());
    }

    fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create directory: {}", data_dir.display()))?;

    Ok(data_dir)
}

/// Path of the persisted task collection
pub fn tasks_file(data_dir: &Path) -> PathBuf {
    data_dir.join("tasks.json")
}

/// Path of the settings file
pub fn settings_file(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Path of the log file
pub fn log_file(data_dir: &Path) -> PathBuf {
    data_dir.join("stint.log")
}

/// Atomically write content to a file using temp file + rename
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StorageError> {
    let path = path.as_ref();
    let dir = path
        .parent()
        .ok_or_else(|| StorageError::NoParent(path.to_path_buf()))?;

    let mut temp_file = NamedTempFile::new_in(dir).map_err(|e| StorageError::io(dir, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StorageError::io(temp_file.path(), e))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StorageError::io(temp_file.path(), e))?;

    temp_file
        .persist(path)
        .map_err(|e| StorageError::io(path, e.error))?;

    Ok(())
}

/// Read file content, None if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, StorageError> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

pub mod error;
pub mod files;
pub mod repository;
pub mod settings;

pub use error::StorageError;
pub use files::{
    ensure_data_dir, get_data_dir, init_local_data_dir, log_file, settings_file, tasks_file,
};
pub use repository::{JsonFileRepository, TaskRepository};
pub use settings::{
    load_settings, parse_break_interval, save_settings, Settings, DEFAULT_BREAK_INTERVAL_MINUTES,
};

#[cfg(test)]
pub use repository::MemoryRepository;

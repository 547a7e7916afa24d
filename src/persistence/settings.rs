use super::error::StorageError;
use super::files::{atomic_write, read_file};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Break interval used when nothing valid is configured
pub const DEFAULT_BREAK_INTERVAL_MINUTES: u32 = 60;
pub const DEFAULT_POMODORO_WORK_MINUTES: u32 = 25;
pub const DEFAULT_POMODORO_BREAK_MINUTES: u32 = 5;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_break_interval")]
    pub break_interval_minutes: u32,
    #[serde(default = "default_work_minutes")]
    pub pomodoro_work_minutes: u32,
    #[serde(default = "default_break_minutes")]
    pub pomodoro_break_minutes: u32,
    #[serde(default = "default_true")]
    pub show_pomodoro: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            break_interval_minutes: DEFAULT_BREAK_INTERVAL_MINUTES,
            pomodoro_work_minutes: DEFAULT_POMODORO_WORK_MINUTES,
            pomodoro_break_minutes: DEFAULT_POMODORO_BREAK_MINUTES,
            show_pomodoro: true,
        }
    }
}

fn default_break_interval() -> u32 {
    DEFAULT_BREAK_INTERVAL_MINUTES
}

fn default_work_minutes() -> u32 {
    DEFAULT_POMODORO_WORK_MINUTES
}

fn default_break_minutes() -> u32 {
    DEFAULT_POMODORO_BREAK_MINUTES
}

fn default_true() -> bool {
    true
}

impl Settings {
    /// Replace zero durations with their defaults
    pub fn sanitized(mut self) -> Self {
        if self.break_interval_minutes == 0 {
            self.break_interval_minutes = DEFAULT_BREAK_INTERVAL_MINUTES;
        }
        if self.pomodoro_work_minutes == 0 {
            self.pomodoro_work_minutes = DEFAULT_POMODORO_WORK_MINUTES;
        }
        if self.pomodoro_break_minutes == 0 {
            self.pomodoro_break_minutes = DEFAULT_POMODORO_BREAK_MINUTES;
        }
        self
    }
}

/// Parse a break interval typed by the user. Anything that is not a positive
/// whole number of minutes falls back to the default.
pub fn parse_break_interval(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(minutes) if minutes > 0 => minutes,
        _ => DEFAULT_BREAK_INTERVAL_MINUTES,
    }
}

/// Load settings from settings.json
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings, StorageError> {
    match read_file(path)? {
        Some(content) => {
            let settings: Settings = serde_json::from_str(&content)?;
            Ok(settings.sanitized())
        }
        None => Ok(Settings::default()),
    }
}

/// Save settings to settings.json
pub fn save_settings<P: AsRef<Path>>(path: P, settings: &Settings) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(settings)?;
    atomic_write(path, &json)
}

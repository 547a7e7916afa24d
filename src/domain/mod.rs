pub mod enums;
pub mod format;
pub mod task;
pub mod views;

pub use enums::{PomodoroPhase, UiMode};
pub use format::{format_countdown, format_time};
pub use task::{total_time, LiveSession, Task, TaskId};
pub use views::{compute_stats, sorted_tasks, DashboardStats};

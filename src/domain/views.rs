use super::task::{total_time, LiveSession, Task};
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Dashboard statistics derived from the task collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardStats {
    /// Banked plus live seconds across all tasks
    pub total_time_spent: u64,
    pub completed_count: usize,
    /// Tasks not yet completed. This is not the number of running timers.
    pub active_count: usize,
}

/// Compute dashboard statistics at `now`
pub fn compute_stats(
    tasks: &[Task],
    session: Option<&LiveSession>,
    now: DateTime<Utc>,
) -> DashboardStats {
    let total_time_spent = tasks
        .iter()
        .map(|task| total_time(task, session, now))
        .sum();
    let completed_count = tasks.iter().filter(|task| task.completed).count();
    let active_count = tasks.iter().filter(|task| !task.completed).count();

    DashboardStats {
        total_time_spent,
        completed_count,
        active_count,
    }
}

/// Display order: running task first, then open before completed, then by name
pub fn sorted_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut sorted: Vec<&Task> = tasks.iter().collect();
    sorted.sort_by(|a, b| compare_for_display(a, b));
    sorted
}

fn compare_for_display(a: &Task, b: &Task) -> Ordering {
    b.active
        .cmp(&a.active)
        .then_with(|| a.completed.cmp(&b.completed))
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Natural-language name order: base letters first, then accents, then
/// case with lowercase before uppercase.
fn compare_names(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// Lowercased text with accents stripped
fn base_letters(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

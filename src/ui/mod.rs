pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod pomodoro_pane;
pub mod stats_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_break_banner, render_settings_modal};
use pomodoro_pane::render_pomodoro_pane;
use ratatui::Frame;
use stats_pane::render_stats_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size, app.settings.show_pomodoro, app.tracker.break_needed());

    render_keybindings(f, app, layout.keybindings_area);

    if let Some(banner_area) = layout.banner_area {
        render_break_banner(f, app, banner_area);
    }

    render_stats_pane(f, app, layout.stats_area);
    if let Some(pomodoro_area) = layout.pomodoro_area {
        render_pomodoro_pane(f, app, pomodoro_area);
    }
    render_list_pane(f, app, layout.list_area);

    match app.ui_mode {
        UiMode::AddingTask | UiMode::EditingTask => render_input_form(f, app, size),
        UiMode::Settings => render_settings_modal(f, app, size),
        UiMode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::notifications::RecordingNotifier;
    use crate::persistence::{MemoryRepository, Settings};
    use crate::tracker::{TaskStore, Tracker};
    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::tempdir;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_render_dashboard() {
        let clock = ManualClock::new();
        let store = TaskStore::open(Box::new(MemoryRepository::default()));
        let mut tracker = Tracker::new(
            store,
            60,
            Box::new(clock.clone()),
            Box::new(RecordingNotifier::default()),
        );
        tracker.add("Write report").unwrap();
        let temp_dir = tempdir().unwrap();
        let mut app = AppState::new(tracker, Settings::default(), temp_dir.path().join("settings.json"));

        app.skip_pomodoro().unwrap();
        app.start_add_task();

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| render(f, &app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Write report"));
        assert!(text.contains("Dashboard"));
        assert!(text.contains("Pomodoro: Break"));
        assert!(text.contains("Time for a break!"));
        assert!(text.contains("Add Task"));
    }
}

use crate::app::AppState;
use crate::domain::UiMode;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Ok(true);
    }

    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask | UiMode::EditingTask => handle_input_form_mode(app, key),
        UiMode::Settings => handle_settings_mode(app, key),
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),

        // Start/stop timer
        KeyCode::Enter => app.toggle_timer_selected()?,

        // Toggle completion
        KeyCode::Char(' ') => app.toggle_completion_selected()?,

        // Delete task
        KeyCode::Char('x') | KeyCode::Char('X') | KeyCode::Delete => app.delete_selected()?,

        KeyCode::Char('a') | KeyCode::Char('A') => app.start_add_task(),
        KeyCode::Char('e') | KeyCode::Char('E') => app.start_edit_task(),
        KeyCode::Char('s') | KeyCode::Char('S') => app.open_settings(),

        // Dismiss break banner
        KeyCode::Char('b') | KeyCode::Char('B') => app.dismiss_break(),

        // Pomodoro
        KeyCode::Char('p') | KeyCode::Char('P') => app.toggle_pomodoro(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_pomodoro()?,
        KeyCode::Char('n') | KeyCode::Char('N') => app.skip_pomodoro()?,
        KeyCode::Char('h') | KeyCode::Char('H') => app.toggle_show_pomodoro()?,

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),

        _ => {}
    }
    Ok(false)
}

/// Handle keys in the add/rename form
fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_input_form()?,
        KeyCode::Esc => app.cancel_input_form(),
        KeyCode::Backspace => app.input_form_backspace(),
        KeyCode::Char(c) => app.input_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

/// Handle keys in the settings modal
fn handle_settings_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Enter => app.submit_settings()?,
        KeyCode::Esc => app.cancel_settings(),
        KeyCode::Tab | KeyCode::Down | KeyCode::Up => app.settings_form_next_field(),
        KeyCode::Backspace => app.settings_form_backspace(),
        KeyCode::Char(c) if c.is_ascii_digit() => app.settings_form_add_char(c),
        _ => {}
    }
    Ok(false)
}

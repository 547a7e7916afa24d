use crate::app::AppState;
use crate::domain::{format_countdown, PomodoroPhase};
use crate::ui::styles::{border_style, gauge_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the Pomodoro countdown with a progress gauge
pub fn render_pomodoro_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let pomodoro = &app.pomodoro;
    let remaining = pomodoro.remaining(app.tracker.now());
    let phase_secs = phase_length_secs(app, pomodoro.phase());
    let on_break = pomodoro.phase() == PomodoroPhase::Break;

    let state = if pomodoro.is_running() { "" } else { " (paused)" };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Pomodoro: {}{} ", pomodoro.phase().name(), state),
            title_style(),
        ));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let gauge = Gauge::default()
        .gauge_style(gauge_style(on_break))
        .ratio(elapsed_ratio(remaining, phase_secs))
        .label(format_countdown(remaining));
    f.render_widget(gauge, rows[0]);

    let sessions = Paragraph::new(Line::raw(format!(
        "Sessions completed: {}",
        pomodoro.completed_work_sessions()
    )));
    f.render_widget(sessions, rows[1]);
}

fn phase_length_secs(app: &AppState, phase: PomodoroPhase) -> u64 {
    let minutes = match phase {
        PomodoroPhase::Work => app.settings.pomodoro_work_minutes,
        PomodoroPhase::Break => app.settings.pomodoro_break_minutes,
    };
    u64::from(minutes) * 60
}

/// Share of the phase already elapsed, clamped to 0..=1
fn elapsed_ratio(remaining: u64, phase_secs: u64) -> f64 {
    if phase_secs == 0 {
        return 0.0;
    }
    let elapsed = phase_secs.saturating_sub(remaining);
    (elapsed as f64 / phase_secs as f64).clamp(0.0, 1.0)
}

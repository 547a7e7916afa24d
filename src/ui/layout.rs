use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Height of the stats row
const STATS_HEIGHT: u16 = 5;

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub banner_area: Option<Rect>,
    pub stats_area: Rect,
    pub pomodoro_area: Option<Rect>,
    pub list_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Break banner (3 rows, only while a break is needed)
/// - Stats row: dashboard stats, with the Pomodoro on the right when shown
/// - Task list fills the rest
pub fn create_layout(area: Rect, show_pomodoro: bool, show_banner: bool) -> MainLayout {
    let banner_height = if show_banner { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),             // Keybindings bar
            Constraint::Length(banner_height), // Break banner
            Constraint::Length(STATS_HEIGHT),  // Stats + Pomodoro
            Constraint::Min(0),                // Task list
        ])
        .split(area);

    let (stats_area, pomodoro_area) = if show_pomodoro {
        let row = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(chunks[2]);
        (row[0], Some(row[1]))
    } else {
        (chunks[2], None)
    };

    MainLayout {
        keybindings_area: chunks[0],
        banner_area: show_banner.then_some(chunks[1]),
        stats_area,
        pomodoro_area,
        list_area: chunks[3],
    }
}

/// Create centered modal area
pub fn create_modal_area(area: Rect) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(12),
            Constraint::Percentage(25),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

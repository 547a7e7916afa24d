use crate::app::AppState;
use crate::domain::format_time;
use crate::ui::styles::{border_style, default_style, running_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the dashboard stats: total time, open and completed counts
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.tracker.stats();

    let total_style = if app.tracker.running_task().is_some() {
        running_style()
    } else {
        default_style()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Total time: ", title_style()),
            Span::styled(format_time(stats.total_time_spent), total_style),
        ]),
        Line::from(vec![
            Span::styled("Open:       ", title_style()),
            Span::raw(stats.active_count.to_string()),
            Span::styled("   Completed: ", title_style()),
            Span::raw(stats.completed_count.to_string()),
        ]),
    ];

    if let Some(task) = app.tracker.running_task() {
        lines.push(Line::from(vec![
            Span::styled("Working on: ", title_style()),
            Span::styled(task.name.clone(), running_style()),
        ]));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Dashboard ", title_style())),
    );

    f.render_widget(paragraph, area);
}

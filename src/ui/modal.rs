use crate::app::{AppState, SettingsFormState};
use crate::ui::{
    layout::create_modal_area,
    styles::{banner_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the break reminder banner
pub fn render_break_banner(f: &mut Frame, app: &AppState, area: Rect) {
    let message = match app.tracker.running_task() {
        Some(task) => format!(
            " Time for a break! You've been working on \"{}\" for {} minutes. ",
            task.name,
            app.tracker.break_interval_minutes()
        ),
        None => " Time for a break! ".to_string(),
    };

    let lines = vec![
        Line::raw(message),
        Line::from(vec![
            Span::raw(" Press "),
            Span::styled("[b]", modal_title_style()),
            Span::raw(" to dismiss"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .style(banner_style())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

/// Render the settings modal
pub fn render_settings_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.settings_form else {
        return;
    };
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    lines.push(field_line(form, 0, "Break reminder (minutes)", &form.break_interval));
    lines.push(field_line(form, 1, "Pomodoro work (minutes)", &form.work_minutes));
    lines.push(field_line(form, 2, "Pomodoro break (minutes)", &form.break_minutes));
    lines.push(Line::raw(""));
    lines.push(Line::raw("Tab next field  ·  Enter save  ·  Esc cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Settings ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn field_line<'a>(form: &SettingsFormState, index: usize, label: &'a str, value: &'a str) -> Line<'a> {
    let editing = form.editing_field == index;
    Line::from(vec![
        Span::raw(if editing { "> " } else { "  " }),
        Span::raw(label),
        Span::raw(": "),
        Span::styled(value, modal_title_style()),
        if editing {
            Span::styled("█", modal_title_style()) // Cursor
        } else {
            Span::raw("")
        },
    ])
}

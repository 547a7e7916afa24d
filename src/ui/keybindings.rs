use crate::app::AppState;
use crate::ui::styles::{error_style, hint_style};
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar, or the last error in its place
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(message) = &app.status_message {
        let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {}", message), error_style())));
        f.render_widget(paragraph, area);
        return;
    }

    let hints = Line::from(vec![
        Span::raw(" ↑/↓ select   "),
        Span::raw("Enter start/stop   "),
        Span::raw("Space done   "),
        Span::raw("a add   "),
        Span::raw("e rename   "),
        Span::raw("x delete   "),
        Span::raw("s settings   "),
        Span::raw("b dismiss   "),
        Span::raw("p/r/n pomodoro   "),
        Span::raw("h hide   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}

use crate::app::AppState;
use crate::domain::{format_time, Task};
use crate::ui::styles::{
    border_style, default_style, done_style, idle_style, running_style, selected_style,
    title_style,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the task list in display order
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Tasks ", title_style()));

    let sorted = app.tracker.sorted_tasks();
    if sorted.is_empty() {
        let empty = Paragraph::new(" No tasks yet. Press 'a' to add one.").block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = sorted
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, app.tracker.total_time(task));
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Create a single line for a task
/// Format: [x] Write proposal   ⏱ 01:02:05  ▶ RUNNING
fn create_task_line(task: &Task, total_secs: u64) -> Line<'static> {
    let mut spans = Vec::new();

    let checkbox = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(checkbox));

    let name_style = if task.completed {
        done_style()
    } else {
        Style::default()
    };
    spans.push(Span::styled(task.name.clone(), name_style));
    spans.push(Span::raw("   "));

    let time_style = if task.active {
        running_style()
    } else {
        idle_style()
    };
    spans.push(Span::styled(format!("⏱ {}", format_time(total_secs)), time_style));

    if task.active {
        spans.push(Span::styled("  ▶ RUNNING", running_style()));
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_create_task_line() {
        let task = Task::new("Test task".to_string());
        let text = line_text(&create_task_line(&task, 125));

        assert!(text.starts_with("[ ] Test task"));
        assert!(text.contains("00:02:05"));
        assert!(!text.contains("RUNNING"));
    }

    #[test]
    fn test_running_and_completed_lines() {
        let mut task = Task::new("Busy".to_string());
        task.start(Utc::now());
        assert!(line_text(&create_task_line(&task, 0)).contains("RUNNING"));

        let mut done = Task::new("Done".to_string());
        done.completed = true;
        assert!(line_text(&create_task_line(&done, 3600)).starts_with("[x] Done"));
    }
}

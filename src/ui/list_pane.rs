use crate::app::AppState;
use crate::domain::{Focus, Task};
use crate::report::format_minutes;
use crate::ui::styles::{
    border_style, default_style, done_style, focused_border_style, hint_style, selected_style,
    title_style,
};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.repo.tasks();

    let items: Vec<ListItem> = if tasks.is_empty() {
        vec![ListItem::new(Line::styled(
            "  No tasks yet. Press 'a' to add one.",
            hint_style(),
        ))]
    } else {
        tasks
            .iter()
            .enumerate()
            .map(|(idx, task)| {
                let scheduled = !app.planner.schedule_file().entries_for_task(&task.id).is_empty();
                let line = create_task_line(task, scheduled);
                let style = if idx == app.selected_index && app.focus == Focus::Tasks {
                    selected_style()
                } else if task.completed {
                    done_style()
                } else {
                    default_style()
                };
                ListItem::new(line).style(style)
            })
            .collect()
    };

    let date = Local::now().format("%a %b %d");
    let stats = app.repo.stats();
    let title = format!(
        " Tasks ({}) {}/{} done ",
        date, stats.completed, stats.total
    );
    let border = if app.focus == Focus::Tasks {
        focused_border_style()
    } else {
        border_style()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: [x] Write proposal  ⏱ 1h 30m  📅
fn create_task_line(task: &Task, scheduled: bool) -> Line<'static> {
    let mut spans = Vec::new();

    let check = if task.completed { "[x] " } else { "[ ] " };
    spans.push(Span::raw(check.to_string()));
    spans.push(Span::raw(task.title.clone()));
    spans.push(Span::raw(format!("  ⏱ {}", format_minutes(task.time_in_minutes))));

    if task.first_principles.is_some() || task.steps.is_some() {
        spans.push(Span::raw(" ✨".to_string()));
    }
    if scheduled {
        spans.push(Span::raw(" 📅".to_string()));
    }

    Line::from(spans)
}

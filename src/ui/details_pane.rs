use crate::app::AppState;
use crate::report::format_minutes;
use crate::ui::styles::{border_style, default_style, done_style, title_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Render the details pane for the selected task
pub fn render_details_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Details ", title_style()));

    let Some(task) = app.selected_task() else {
        f.render_widget(Paragraph::new("No task selected").block(block), area);
        return;
    };

    let mut lines = Vec::new();

    lines.push(Line::from(vec![
        Span::styled("Title: ", title_style()),
        Span::raw(task.title.as_str()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Est:   ", title_style()),
        Span::raw(format_minutes(task.time_in_minutes)),
    ]));
    let (status, status_style) = if task.completed {
        ("Completed", done_style())
    } else {
        ("Pending", default_style())
    };
    lines.push(Line::from(vec![
        Span::styled("Status: ", title_style()),
        Span::styled(status, status_style),
    ]));
    lines.push(Line::raw(""));

    // Schedule slots
    let mut hours: Vec<u32> = app
        .planner
        .schedule_file()
        .entries_for_task(&task.id)
        .iter()
        .map(|e| e.start_hour)
        .collect();
    hours.sort_unstable();
    if !hours.is_empty() {
        let slots: Vec<String> = hours.iter().map(|h| format!("{:02}:00", h)).collect();
        lines.push(Line::from(vec![
            Span::styled("Scheduled: ", title_style()),
            Span::raw(slots.join(", ")),
        ]));
        lines.push(Line::raw(""));
    }

    if let Some(fp) = &task.first_principles {
        lines.push(Line::from(Span::styled("First principles:", title_style())));
        lines.push(Line::raw(format!("  {}", fp)));
        lines.push(Line::raw(""));
    }

    if let Some(steps) = &task.steps {
        lines.push(Line::from(Span::styled("Steps:", title_style())));
        for (i, step) in steps.iter().enumerate() {
            lines.push(Line::raw(format!("  {}. {}", i + 1, step)));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}

use crate::app::{AppState, ScheduleTarget};
use crate::domain::{HOURS_PER_DAY, UiMode};
use crate::report::format_minutes;
use crate::ui::{
    layout::create_modal_area,
    planner_pane::{hour_titles, occupancy_bar},
    styles::{hint_style, modal_bg_style, modal_title_style, selected_style, tip_category_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Hours listed above and below the picker cursor
const PICKER_CONTEXT: u32 = 3;

/// Render the hour picker used to place or move a task
pub fn render_schedule_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let Some(form) = &app.schedule_form else {
        return;
    };

    let (title, task_id) = match &form.target {
        ScheduleTarget::Place { task_id } => (" Schedule Task ", task_id),
        ScheduleTarget::Move { task_id, .. } => (" Move Task ", task_id),
    };
    let task = app.repo.get(task_id);

    let modal_area = create_modal_area(area, 16);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    if let Some(task) = task {
        lines.push(Line::from(vec![
            Span::styled(task.title.as_str(), modal_title_style()),
            Span::raw(format!(" ({})", format_minutes(task.time_in_minutes))),
        ]));
    }
    if let ScheduleTarget::Move { from_hour, .. } = &form.target {
        lines.push(Line::styled(format!("from {:02}:00", from_hour), hint_style()));
    }
    lines.push(Line::raw(""));

    let schedule = app.planner.schedule_file();
    let first = form.hour.saturating_sub(PICKER_CONTEXT);
    let last = (form.hour + PICKER_CONTEXT).min(HOURS_PER_DAY - 1);
    for hour in first..=last {
        let occupancy = schedule.hour_occupancy(hour);
        let text = format!(
            "{} {:02}:00 {} {}",
            if hour == form.hour { "▶" } else { " " },
            hour,
            occupancy_bar(occupancy, 6),
            hour_titles(schedule, hour)
        );
        if hour == form.hour {
            lines.push(Line::styled(text, selected_style()));
        } else {
            lines.push(Line::raw(text));
        }
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("↑↓ to pick an hour  ·  Enter to confirm  ·  Esc to cancel"));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

const HELP_KEYS: &[(&str, &str)] = &[
    ("↑↓ / j k", "Move selection"),
    ("Tab", "Switch between tasks and planner"),
    ("a", "Add task (Ctrl+E in the form asks for an estimate)"),
    ("Space / Enter", "Toggle task completed"),
    ("x / Del", "Delete task, or unschedule in the planner"),
    ("s", "Schedule the selected task"),
    ("m / Enter", "Move the planner entry under the cursor"),
    ("p", "Start or pause the pomodoro"),
    ("r", "Reset the pomodoro"),
    ("c", "Cycle pomodoro mode"),
    ("t", "Productivity tips (t / r again for new ones)"),
    ("q / Esc", "Quit"),
];

/// Render the key reference
pub fn render_help_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if app.ui_mode != UiMode::Help {
        return;
    }

    let modal_area = create_modal_area(area, HELP_KEYS.len() as u16 + 4);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for (keys, action) in HELP_KEYS {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<14}", keys), modal_title_style()),
            Span::raw(*action),
        ]));
    }
    lines.push(Line::styled("  Press any key to close", hint_style()));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(" Help ", modal_title_style()))
            .style(modal_bg_style()),
    );

    f.render_widget(paragraph, modal_area);
}

/// Render the current tip selection
pub fn render_tips_modal(f: &mut Frame, app: &AppState, area: Rect) {
    let modal_area = create_modal_area(area, app.tips.len() as u16 * 4 + 4);
    f.render_widget(Clear, modal_area);

    let mut lines = vec![Line::raw("")];
    for tip in &app.tips {
        lines.push(Line::from(vec![
            Span::styled(tip.title, modal_title_style()),
            Span::raw("  "),
            Span::styled(format!("[{}]", tip.category.label()), tip_category_style(tip.category)),
        ]));
        lines.push(Line::raw(tip.description));
        lines.push(Line::raw(""));
    }
    lines.push(Line::styled("t / r for new tips  ·  any other key to close", hint_style()));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Tips ", modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

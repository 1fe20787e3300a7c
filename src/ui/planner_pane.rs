use crate::app::AppState;
use crate::domain::{Focus, ScheduleFile, HOURS_PER_DAY};
use crate::report::format_minutes;
use crate::ui::styles::{
    border_style, current_hour_style, focused_border_style, hint_style, occupancy_style,
    selected_style, title_style,
};
use chrono::{Local, Timelike};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the occupancy bar in cells
const BAR_WIDTH: usize = 8;

/// Text bar for an occupancy percentage, e.g. `████░░░░`
pub fn occupancy_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Titles of the entries covering `hour`, comma separated
pub fn hour_titles(schedule: &ScheduleFile, hour: u32) -> String {
    schedule
        .tasks_for_hour(hour)
        .iter()
        .map(|e| e.task_title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render the 24-hour planner grid
pub fn render_planner_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let now = Local::now();
    let current_hour = now.hour();
    let schedule = app.planner.schedule_file();
    let focused = app.focus == Focus::Planner;

    let title_width = area.width.saturating_sub(BAR_WIDTH as u16 + 15) as usize;

    let mut all_lines: Vec<Line> = (0..HOURS_PER_DAY)
        .map(|hour| {
            let occupancy = schedule.hour_occupancy(hour);
            let label_style = if focused && hour == app.planner_hour {
                selected_style()
            } else if hour == current_hour {
                current_hour_style()
            } else {
                hint_style()
            };
            let marker = if hour == current_hour { "▶" } else { " " };

            Line::from(vec![
                Span::styled(format!("{}{:02}:00 ", marker, hour), label_style),
                Span::styled(occupancy_bar(occupancy, BAR_WIDTH), occupancy_style(occupancy)),
                Span::raw(format!(" {:>3.0}% ", occupancy)),
                Span::raw(truncate_string(&hour_titles(schedule, hour), title_width)),
            ])
        })
        .collect();

    all_lines.push(Line::from(""));
    all_lines.push(Line::styled(
        format!(
            "Scheduled {} • {} unscheduled",
            format_minutes(schedule.total_scheduled_minutes()),
            schedule.unscheduled_tasks(app.repo.tasks()).len()
        ),
        hint_style(),
    ));

    // Keep the cursor row (or the current hour) in view
    let available_height = area.height.saturating_sub(2) as usize;
    let anchor = (if focused { app.planner_hour } else { current_hour }) as usize;
    let scroll_offset = anchor
        .saturating_sub(available_height / 2)
        .min(all_lines.len().saturating_sub(available_height));
    let visible_lines: Vec<Line> = all_lines
        .into_iter()
        .skip(scroll_offset)
        .take(available_height)
        .collect();

    let border = if focused {
        focused_border_style()
    } else {
        border_style()
    };
    let title = format!(" Planner 🕒 {} ", now.format("%H:%M:%S"));
    let paragraph = Paragraph::new(visible_lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(paragraph, area);
}

/// Truncate to `max_len` characters with a trailing ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    } else {
        s.chars().take(max_len).collect()
    }
}

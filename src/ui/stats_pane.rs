use crate::app::AppState;
use crate::report::{calculate_duration_histogram, format_minutes, PerformanceLevel};
use crate::ui::styles::{border_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Width of the histogram bars in cells
const HISTOGRAM_WIDTH: usize = 12;

/// Scale `count` against `max` into a bar of `width` cells
fn histogram_bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let filled = (count * width).div_ceil(max).min(width);
    "▇".repeat(filled)
}

/// Render the statistics dashboard
pub fn render_stats_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let stats = app.repo.stats();
    let histogram = calculate_duration_histogram(app.repo.tasks());
    let level = PerformanceLevel::from_completion_rate(stats.completion_rate);

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .percent(stats.completion_rate.min(100) as u16)
        .label(format!("{}/{} done", stats.completed, stats.total));

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Planned: ", title_style()),
            Span::raw(format!(
                "{}   ({} per task)",
                format_minutes(stats.total_minutes),
                format_minutes(stats.average_task_minutes)
            )),
        ]),
        Line::from(vec![
            Span::styled("Remaining: ", title_style()),
            Span::raw(format!(
                "{}   ({}% of time done)",
                format_minutes(stats.remaining_minutes),
                stats.time_completion_rate
            )),
        ]),
        Line::from(vec![
            Span::styled(format!("{}: ", level.label()), title_style()),
            Span::styled(level.message(), hint_style()),
        ]),
        Line::from(""),
    ];

    let max = histogram.max_count();
    for (label, count) in histogram.bins() {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<15}", label)),
            Span::styled(
                format!("{:<width$}", histogram_bar(count, max, HISTOGRAM_WIDTH), width = HISTOGRAM_WIDTH),
                gauge_style(),
            ),
            Span::raw(format!(" {}", count)),
        ]));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Stats ", title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Gauge
            Constraint::Length(1), // Spacing
            Constraint::Min(0),    // Text lines
        ])
        .split(block.inner(area));

    f.render_widget(block, area);
    f.render_widget(gauge, chunks[0]);
    f.render_widget(Paragraph::new(lines), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_bar_scales_to_max() {
        assert_eq!(histogram_bar(0, 0, 10), "");
        assert_eq!(histogram_bar(0, 4, 8), "");
        assert_eq!(histogram_bar(4, 4, 8), "▇".repeat(8));
        assert_eq!(histogram_bar(1, 4, 8), "▇".repeat(2));
        assert_eq!(histogram_bar(1, 3, 8), "▇".repeat(3));
    }
}

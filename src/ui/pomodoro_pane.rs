use crate::app::AppState;
use crate::ui::styles::{border_style, gauge_style, hint_style, title_style};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

/// Render the pomodoro timer
pub fn render_pomodoro_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let pomodoro = &app.pomodoro;

    let state = if pomodoro.running { "▶" } else { "⏸" };
    let header = Line::from(vec![
        Span::raw(format!("{} ", pomodoro.mode.symbol())),
        Span::styled(pomodoro.mode.name(), title_style()),
        Span::raw(format!("  {} {}", state, pomodoro.remaining_formatted())),
    ]);
    let footer = Line::styled(
        format!("Completed: {}", pomodoro.completed_pomodoros),
        hint_style(),
    );

    let gauge = Gauge::default()
        .gauge_style(gauge_style())
        .ratio(pomodoro.progress_ratio().clamp(0.0, 1.0))
        .label("");

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Pomodoro ", title_style()));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(block.inner(area));

    f.render_widget(block, area);
    f.render_widget(Paragraph::new(header), chunks[0]);
    f.render_widget(gauge, chunks[1]);
    f.render_widget(Paragraph::new(footer), chunks[2]);
}

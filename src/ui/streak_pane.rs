use crate::app::AppState;
use crate::domain::streak_badge;
use crate::ui::styles::{border_style, hint_style, streak_style, title_style};
use chrono::Local;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the daily streak counter
pub fn render_streak_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let status = app.streak.load_status();

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} {} day", streak_badge(status.current_streak), status.current_streak),
                streak_style(),
            ),
            Span::styled(
                if status.current_streak == 1 { "" } else { "s" },
                streak_style(),
            ),
        ]),
        Line::from(vec![
            Span::styled("Best: ", title_style()),
            Span::raw(format!("{}", status.longest_streak)),
            Span::styled("  Total: ", title_style()),
            Span::raw(format!("{}", status.total_days)),
        ]),
        if status.was_active_on(Local::now().date_naive()) {
            Line::styled("✓ Active today", hint_style())
        } else if status.current_streak == 0 {
            Line::styled("Finish a task to start a streak", hint_style())
        } else {
            Line::styled("Finish a task to keep it going", hint_style())
        },
    ];

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Streak ", title_style())),
    );
    f.render_widget(paragraph, area);
}

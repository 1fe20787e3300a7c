use crate::app::AppState;
use crate::domain::Focus;
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar for the focused pane
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let mut hints = vec![Span::raw(" ↑/↓ select   "), Span::raw("Tab pane   ")];

    match app.focus {
        Focus::Tasks => hints.extend([
            Span::raw("a add   "),
            Span::raw("Space done   "),
            Span::raw("x delete   "),
            Span::raw("s schedule   "),
        ]),
        Focus::Planner => hints.extend([
            Span::raw("m move   "),
            Span::raw("x unschedule   "),
        ]),
    }

    hints.extend([
        Span::raw("p timer   "),
        Span::raw("r reset   "),
        Span::raw("c mode   "),
        Span::raw("t tips   "),
        Span::raw("? help   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(Line::from(hints)).style(hint_style());
    f.render_widget(paragraph, area);
}

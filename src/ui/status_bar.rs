use crate::app::AppState;
use crate::quotes::quote_at;
use crate::ui::styles::{hint_style, quote_style, toast_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Bottom line: the active toast, otherwise the rotating quote
pub fn render_status_bar(f: &mut Frame, app: &AppState, area: Rect) {
    let line = match &app.toast {
        Some(toast) => Line::styled(
            format!("{} {}", toast.kind.symbol(), toast.message),
            toast_style(toast.kind),
        ),
        None => {
            let quote = quote_at(app.quote_index);
            Line::from(vec![
                Span::styled(format!("\"{}\"", quote.text), quote_style()),
                Span::styled(format!(" - {}", quote.author), hint_style()),
            ])
        }
    };

    f.render_widget(Paragraph::new(line), area);
}

use crate::domain::ToastKind;
use crate::tips::TipCategory;
use ratatui::style::{Color, Modifier, Style};

/// Default text style
pub fn default_style() -> Style {
    Style::default().fg(Color::White)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::LightCyan)
        .add_modifier(Modifier::BOLD)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Border of the pane that receives navigation keys
pub fn focused_border_style() -> Style {
    Style::default().fg(Color::LightCyan)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::DarkGray).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Gauge style
pub fn gauge_style() -> Style {
    Style::default().fg(Color::Green).bg(Color::DarkGray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

/// Done/completed task style
pub fn done_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Streak flame style
pub fn streak_style() -> Style {
    Style::default()
        .fg(Color::LightRed)
        .add_modifier(Modifier::BOLD)
}

/// Planner row for the current hour
pub fn current_hour_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Occupancy bar colour: green when light, yellow when filling, red when full
pub fn occupancy_style(percent: f64) -> Style {
    let color = if percent >= 100.0 {
        Color::Red
    } else if percent >= 50.0 {
        Color::Yellow
    } else {
        Color::Green
    };
    Style::default().fg(color)
}

pub fn toast_style(kind: ToastKind) -> Style {
    match kind {
        ToastKind::Success => Style::default().fg(Color::Green),
        ToastKind::Info => Style::default().fg(Color::Cyan),
        ToastKind::Error => error_style(),
    }
}

/// Quote text style
pub fn tip_category_style(category: TipCategory) -> Style {
    match category {
        TipCategory::Productivity => Style::default().fg(Color::Blue),
        TipCategory::Wellness => Style::default().fg(Color::Green),
        TipCategory::Strategy => Style::default().fg(Color::Magenta),
    }
}

pub fn quote_style() -> Style {
    Style::default()
        .fg(Color::Gray)
        .add_modifier(Modifier::ITALIC)
}

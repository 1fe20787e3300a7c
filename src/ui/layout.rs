use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Main layout structure
pub struct MainLayout {
    pub keybindings_area: Rect,
    pub list_area: Rect,
    pub details_area: Rect,
    pub planner_area: Rect,
    pub stats_area: Rect,
    pub streak_area: Rect,
    pub pomodoro_area: Rect,
    pub status_area: Rect,
}

/// Create the main layout
/// - Top bar: keybindings (1 row)
/// - Upper area: List (45%) | Details (25%) | Planner (30%)
/// - Lower area: Stats (40%) | Streak (30%) | Pomodoro (30%)
/// - Bottom bar: quote or toast (1 row)
pub fn create_layout(area: Rect) -> MainLayout {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Keybindings bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let vertical_split = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(62), // Tasks and planner
            Constraint::Percentage(38), // Cards
        ])
        .split(main_chunks[1]);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45), // List pane
            Constraint::Percentage(25), // Details pane
            Constraint::Percentage(30), // Planner pane
        ])
        .split(vertical_split[0]);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Stats pane
            Constraint::Percentage(30), // Streak pane
            Constraint::Percentage(30), // Pomodoro pane
        ])
        .split(vertical_split[1]);

    MainLayout {
        keybindings_area: main_chunks[0],
        list_area: top[0],
        details_area: top[1],
        planner_area: top[2],
        stats_area: bottom[0],
        streak_area: bottom[1],
        pomodoro_area: bottom[2],
        status_area: main_chunks[2],
    }
}

/// Create a centered modal area of fixed `height`
pub fn create_modal_area(area: Rect, height: u16) -> Rect {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(60),
            Constraint::Percentage(20),
        ])
        .split(vertical_chunks[1]);

    horizontal_chunks[1]
}

pub mod details_pane;
pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod planner_pane;
pub mod pomodoro_pane;
pub mod stats_pane;
pub mod status_bar;
pub mod streak_pane;
pub mod styles;

use crate::app::AppState;
use crate::domain::UiMode;
use details_pane::render_details_pane;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::{render_help_modal, render_schedule_modal, render_tips_modal};
use planner_pane::render_planner_pane;
use pomodoro_pane::render_pomodoro_pane;
use ratatui::Frame;
use stats_pane::render_stats_pane;
use status_bar::render_status_bar;
use streak_pane::render_streak_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_keybindings(f, app, layout.keybindings_area);

    render_list_pane(f, app, layout.list_area);
    render_details_pane(f, app, layout.details_area);
    render_planner_pane(f, app, layout.planner_area);
    render_stats_pane(f, app, layout.stats_area);
    render_streak_pane(f, app, layout.streak_area);
    render_pomodoro_pane(f, app, layout.pomodoro_area);
    render_status_bar(f, app, layout.status_area);

    match app.ui_mode {
        UiMode::AddingTask => render_input_form(f, app, size),
        UiMode::Scheduling => render_schedule_modal(f, app, size),
        UiMode::Help => render_help_modal(f, app, size),
        UiMode::Tips => render_tips_modal(f, app, size),
        UiMode::Normal => {}
    }
}

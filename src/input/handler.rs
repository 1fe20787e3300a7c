use crate::app::AppState;
use crate::domain::{Focus, UiMode};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Handle keyboard input events. Returns true when the app should quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match app.ui_mode {
        UiMode::Normal => handle_normal_mode(app, key),
        UiMode::AddingTask => handle_input_form_mode(app, key),
        UiMode::Scheduling => handle_schedule_mode(app, key),
        UiMode::Help => {
            // Any key closes help
            app.ui_mode = UiMode::Normal;
            Ok(false)
        }
        UiMode::Tips => {
            match key.code {
                KeyCode::Char('t') | KeyCode::Char('r') => app.refresh_tips(),
                _ => app.ui_mode = UiMode::Normal,
            }
            Ok(false)
        }
    }
}

/// Handle keys in normal mode
fn handle_normal_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        // Navigation
        KeyCode::Up | KeyCode::Char('k') => {
            app.move_selection_up();
            Ok(false)
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.move_selection_down();
            Ok(false)
        }
        KeyCode::Tab => {
            app.toggle_focus();
            Ok(false)
        }

        // Tasks
        KeyCode::Char('a') | KeyCode::Char('A') => {
            app.start_add_task();
            Ok(false)
        }
        KeyCode::Char(' ') | KeyCode::Enter if app.focus == Focus::Tasks => {
            app.toggle_selected();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Delete if app.focus == Focus::Tasks => {
            app.delete_selected();
            Ok(false)
        }
        KeyCode::Char('s') | KeyCode::Char('S') if app.focus == Focus::Tasks => {
            app.start_schedule_selected();
            Ok(false)
        }

        // Planner
        KeyCode::Char('m') | KeyCode::Enter if app.focus == Focus::Planner => {
            app.start_move_planner_entry();
            Ok(false)
        }
        KeyCode::Char('x') | KeyCode::Delete if app.focus == Focus::Planner => {
            app.unschedule_selected_entry();
            Ok(false)
        }

        // Pomodoro
        KeyCode::Char('p') | KeyCode::Char('P') => {
            app.toggle_pomodoro();
            Ok(false)
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.reset_pomodoro();
            Ok(false)
        }
        KeyCode::Char('c') | KeyCode::Char('C') => {
            app.cycle_pomodoro_mode();
            Ok(false)
        }

        KeyCode::Char('?') => {
            app.ui_mode = UiMode::Help;
            Ok(false)
        }
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.show_tips();
            Ok(false)
        }

        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Ok(true),

        _ => Ok(false),
    }
}

fn handle_input_form_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    // Only cancel is honoured while an estimate is in flight
    if app.is_estimating() && key.code != KeyCode::Esc {
        return Ok(false);
    }

    match key.code {
        // Request AI estimate
        KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.request_estimate();
            Ok(false)
        }

        // Submit form
        KeyCode::Enter => {
            app.submit_input_form();
            Ok(false)
        }

        // Cancel form
        KeyCode::Esc => {
            app.cancel_input_form();
            Ok(false)
        }

        // Switch between title, hours and minutes
        KeyCode::Tab => {
            app.input_form_toggle_field();
            Ok(false)
        }

        KeyCode::Backspace => {
            app.input_form_backspace();
            Ok(false)
        }

        KeyCode::Char(c) => {
            app.input_form_add_char(c);
            Ok(false)
        }

        _ => Ok(false),
    }
}

fn handle_schedule_mode(app: &mut AppState, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.schedule_form_up(),
        KeyCode::Down | KeyCode::Char('j') => app.schedule_form_down(),
        KeyCode::Enter => app.submit_schedule_form(),
        KeyCode::Esc => app.cancel_schedule_form(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::persistence::MemoryStore;
    use std::sync::Arc;

    fn create_test_app() -> AppState {
        let mut app = AppState::new(Arc::new(MemoryStore::new()), Config::default()).unwrap();
        app.repo.add("Test task", 60, None, None).unwrap();
        app
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            handle_key(app, key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_handle_navigation() {
        let mut app = create_test_app();
        app.repo.add("Task 2", 30, None, None).unwrap();

        assert_eq!(app.selected_index, 0);

        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        assert_eq!(app.selected_index, 1);

        handle_key(&mut app, key(KeyCode::Up)).unwrap();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_handle_quit() {
        let mut app = create_test_app();
        let should_quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(should_quit);
    }

    #[test]
    fn test_handle_add_task() {
        let mut app = create_test_app();
        let initial_count = app.repo.len();

        // Press 'a' to open form
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::AddingTask);
        assert!(app.input_form.is_some());

        type_str(&mut app, "New");
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        type_str(&mut app, "45");

        // Submit with Enter
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.repo.len(), initial_count + 1);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.is_none());
        assert_eq!(app.selected_task().unwrap().time_in_minutes, 45);
    }

    #[test]
    fn test_form_typing_q_does_not_quit() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('a'))).unwrap();
        let quit = handle_key(&mut app, key(KeyCode::Char('q'))).unwrap();
        assert!(!quit);
        assert_eq!(app.input_form.as_ref().unwrap().title, "q");
    }

    #[test]
    fn test_handle_toggle_and_delete() {
        let mut app = create_test_app();

        handle_key(&mut app, key(KeyCode::Char(' '))).unwrap();
        assert!(app.repo.tasks()[0].completed);

        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.repo.is_empty());
    }

    #[test]
    fn test_handle_schedule_flow() {
        let mut app = create_test_app();
        app.planner_hour = 8;

        handle_key(&mut app, key(KeyCode::Char('s'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Scheduling);
        handle_key(&mut app, key(KeyCode::Down)).unwrap();
        handle_key(&mut app, key(KeyCode::Enter)).unwrap();
        assert_eq!(app.planner.entries()[0].start_hour, 9);

        // Planner focus: x removes the entry under the cursor
        handle_key(&mut app, key(KeyCode::Tab)).unwrap();
        assert_eq!(app.focus, Focus::Planner);
        handle_key(&mut app, key(KeyCode::Char('x'))).unwrap();
        assert!(app.planner.entries().is_empty());
        assert_eq!(app.repo.len(), 1);
    }

    #[test]
    fn test_help_closes_on_any_key() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('?'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Help);
        handle_key(&mut app, key(KeyCode::Char('z'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_tips_refresh_then_close() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('t'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Tips);
        assert_eq!(app.tips.len(), 3);

        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert_eq!(app.ui_mode, UiMode::Tips);
        assert_eq!(app.tips.len(), 3);
        assert_eq!(app.toast.as_ref().unwrap().message, "Fresh tips loaded!");
        // r refreshes tips here, it must not touch the pomodoro
        assert!(!app.pomodoro.running);

        handle_key(&mut app, key(KeyCode::Esc)).unwrap();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_pomodoro_keys() {
        let mut app = create_test_app();
        handle_key(&mut app, key(KeyCode::Char('p'))).unwrap();
        assert!(app.pomodoro.running);
        handle_key(&mut app, key(KeyCode::Char('r'))).unwrap();
        assert!(!app.pomodoro.running);
    }
}

use crate::config::Config;
use crate::domain::{
    total_minutes, Focus, Pomodoro, PomodoroEvent, ScheduledTask, Task, ToastKind,
    UiMode, ValidationError, HOURS_PER_DAY,
};
use crate::notifications;
use crate::persistence::{KeyValueStore, SchedulePlanner, StreakTracker, TaskRepository};
use crate::relay::{estimate_blocking, Estimate, RelayError};
use crate::ticker;
use crate::tips::{random_tips, Tip};
use anyhow::Result;
use chrono::Timelike;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

/// Result of a background estimate request
pub type EstimateOutcome = (Estimate, Option<RelayError>);

/// Input form state for adding tasks
#[derive(Debug, Clone, Default)]
pub struct InputFormState {
    pub title: String,
    pub hours: String,
    pub minutes: String,
    pub editing_field: usize, // 0 = title, 1 = hours, 2 = minutes
    pub error: Option<String>,
    /// An estimate request is in flight; the form ignores input
    pub estimating: bool,
    pub first_principles: Option<String>,
    pub steps: Option<Vec<String>>,
}

impl InputFormState {
    const FIELDS: usize = 3;

    fn apply_estimate(&mut self, estimate: Estimate) {
        self.hours = (estimate.minutes / 60).to_string();
        self.minutes = (estimate.minutes % 60).to_string();
        let (fp, steps) = estimate.into_analysis();
        self.first_principles = fp;
        self.steps = steps;
    }

    /// Total minutes from the hour/minute fields. Empty fields count as 0.
    fn parse_minutes(&self) -> Result<u32, String> {
        let field = |s: &str| -> Result<u32, String> {
            let s = s.trim();
            if s.is_empty() {
                return Ok(0);
            }
            s.parse::<u32>()
                .map_err(|_| format!("'{}' is not a whole number", s))
        };
        Ok(total_minutes(field(&self.hours)?, field(&self.minutes)?))
    }
}

/// What the hour picker acts on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleTarget {
    /// Place a task on the grid
    Place { task_id: String },
    /// Move an existing entry
    Move { task_id: String, from_hour: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFormState {
    pub hour: u32,
    pub target: ScheduleTarget,
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub created: Instant,
}

/// Main application state
pub struct AppState {
    pub repo: TaskRepository,
    pub streak: StreakTracker,
    pub planner: SchedulePlanner,
    pub pomodoro: Pomodoro,
    pub config: Config,
    pub selected_index: usize,
    pub planner_hour: u32,
    pub focus: Focus,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub schedule_form: Option<ScheduleFormState>,
    pub toast: Option<Toast>,
    pub quote_index: usize,
    pub last_quote_rotation: Instant,
    pub last_tick: Instant,
    pub tips: Vec<Tip>,
    estimate_rx: Option<Receiver<EstimateOutcome>>,
}

impl AppState {
    pub fn new(store: Arc<dyn KeyValueStore>, config: Config) -> Result<Self> {
        let now = Instant::now();
        let repo = TaskRepository::load(store.clone())?;
        let streak = StreakTracker::load(store.clone())?;
        let planner = SchedulePlanner::load(store)?;
        let pomodoro = Pomodoro::new(config.pomodoro.durations());

        Ok(Self {
            repo,
            streak,
            planner,
            pomodoro,
            config,
            selected_index: 0,
            planner_hour: chrono::Local::now().hour(),
            focus: Focus::Tasks,
            ui_mode: UiMode::Normal,
            input_form: None,
            schedule_form: None,
            toast: None,
            quote_index: 0,
            last_quote_rotation: now,
            last_tick: now,
            tips: random_tips(),
            estimate_rx: None,
        })
    }

    // ── Toasts ────────────────────────────────────────────────

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            created: Instant::now(),
        });
    }

    /// Report a failed operation without leaving the dashboard
    fn report_error(&mut self, context: &str, err: anyhow::Error) {
        tracing::error!(error = %err, "{context}");
        self.show_toast(ToastKind::Error, format!("{context}: {err}"));
    }

    // ── Tips ──────────────────────────────────────────────────

    pub fn show_tips(&mut self) {
        self.ui_mode = UiMode::Tips;
    }

    pub fn refresh_tips(&mut self) {
        self.tips = random_tips();
        self.show_toast(ToastKind::Success, "Fresh tips loaded!");
    }

    // ── Selection ─────────────────────────────────────────────

    pub fn selected_task(&self) -> Option<&Task> {
        self.repo.tasks().get(self.selected_index)
    }

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Tasks => self.selected_index = self.selected_index.saturating_sub(1),
            Focus::Planner => self.planner_hour = self.planner_hour.saturating_sub(1),
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Tasks => {
                if self.selected_index + 1 < self.repo.len() {
                    self.selected_index += 1;
                }
            }
            Focus::Planner => {
                if self.planner_hour + 1 < HOURS_PER_DAY {
                    self.planner_hour += 1;
                }
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = self.focus.toggle();
    }

    fn clamp_selection(&mut self) {
        if self.selected_index >= self.repo.len() {
            self.selected_index = self.repo.len().saturating_sub(1);
        }
    }

    /// First planner entry starting at the cursor hour
    pub fn selected_planner_entry(&self) -> Option<&ScheduledTask> {
        self.planner
            .entries()
            .iter()
            .find(|e| e.start_hour == self.planner_hour)
    }

    // ── Tasks ─────────────────────────────────────────────────

    /// Flip completion of the selected task. Completing a task counts as
    /// activity for the streak.
    pub fn toggle_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, title) = (task.id.clone(), task.title.clone());

        match self.repo.toggle(&id) {
            Ok(Some(true)) => {
                notifications::notify_task_done(&title);
                self.record_activity();
                self.show_toast(ToastKind::Success, format!("Completed \"{}\"", title));
            }
            Ok(Some(false)) => {
                self.show_toast(ToastKind::Info, format!("Reopened \"{}\"", title));
            }
            Ok(None) => {}
            Err(e) => self.report_error("Failed to save tasks", e),
        }
    }

    pub fn delete_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        let (id, title) = (task.id.clone(), task.title.clone());

        match self.repo.delete(&id) {
            Ok(true) => {
                self.clamp_selection();
                self.show_toast(ToastKind::Info, format!("Deleted \"{}\"", title));
            }
            Ok(false) => {}
            Err(e) => self.report_error("Failed to save tasks", e),
        }
    }

    fn record_activity(&mut self) {
        if let Err(e) = self.streak.record_activity() {
            self.report_error("Failed to save streak", e);
        }
    }

    // ── Add-task form ─────────────────────────────────────────

    /// Start adding a new task (opens input form)
    pub fn start_add_task(&mut self) {
        self.input_form = Some(InputFormState::default());
        self.ui_mode = UiMode::AddingTask;
    }

    fn editable_form(&mut self) -> Option<&mut InputFormState> {
        self.input_form.as_mut().filter(|f| !f.estimating)
    }

    /// Cycle title -> hours -> minutes
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = self.editable_form() {
            form.editing_field = (form.editing_field + 1) % InputFormState::FIELDS;
        }
    }

    /// Add character to input form (current field). Time fields take digits only.
    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = self.editable_form() {
            match form.editing_field {
                0 => form.title.push(c),
                1 if c.is_ascii_digit() => form.hours.push(c),
                2 if c.is_ascii_digit() => form.minutes.push(c),
                _ => {}
            }
            form.error = None;
        }
    }

    /// Backspace in input form (current field)
    pub fn input_form_backspace(&mut self) {
        if let Some(form) = self.editable_form() {
            match form.editing_field {
                0 => { form.title.pop(); }
                1 => { form.hours.pop(); }
                2 => { form.minutes.pop(); }
                _ => {}
            }
        }
    }

    /// Submit input form and create the task. Validation failures keep the
    /// form open with an inline message.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.editable_form() else {
            return;
        };

        let minutes = match form.parse_minutes() {
            Ok(minutes) => minutes,
            Err(msg) => {
                form.error = Some(msg);
                return;
            }
        };
        let title = form.title.clone();
        let (fp, steps) = (form.first_principles.clone(), form.steps.clone());

        match self.repo.add(&title, minutes, fp, steps) {
            Ok(task) => {
                self.input_form = None;
                self.ui_mode = UiMode::Normal;
                self.selected_index = self.repo.len().saturating_sub(1);
                self.show_toast(ToastKind::Success, format!("Added \"{}\"", task.title));
            }
            Err(e) => match e.downcast_ref::<ValidationError>() {
                Some(invalid) => {
                    let msg = invalid.to_string();
                    if let Some(form) = self.input_form.as_mut() {
                        form.error = Some(msg);
                    }
                }
                None => self.report_error("Failed to save tasks", e),
            },
        }
    }

    /// Cancel input form. An in-flight estimate is abandoned.
    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.estimate_rx = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Ask the relay for an estimate of the form's title on a background thread
    pub fn request_estimate(&mut self) {
        let relay = self.config.relay.clone();
        self.request_estimate_with(move |title| estimate_blocking(relay, &title));
    }

    /// Run `estimator` on a worker thread; the result is picked up by `tick`
    pub fn request_estimate_with<F>(&mut self, estimator: F)
    where
        F: FnOnce(String) -> EstimateOutcome + Send + 'static,
    {
        let Some(form) = self.editable_form() else {
            return;
        };
        let title = form.title.trim().to_string();
        if title.is_empty() {
            form.error = Some(ValidationError::EmptyTitle.to_string());
            return;
        }
        form.estimating = true;
        form.error = None;

        let (tx, rx) = mpsc::channel();
        self.estimate_rx = Some(rx);
        std::thread::spawn(move || {
            // Receiver may be gone if the form was cancelled
            let _ = tx.send(estimator(title));
        });
    }

    pub fn is_estimating(&self) -> bool {
        self.input_form.as_ref().is_some_and(|f| f.estimating)
    }

    /// Apply a finished estimate to the form, if one arrived
    pub fn poll_estimate(&mut self) {
        let Some(rx) = &self.estimate_rx else {
            return;
        };
        let (estimate, err) = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => (
                crate::relay::fallback_estimate(
                    self.input_form.as_ref().map(|f| f.title.as_str()).unwrap_or_default(),
                ),
                Some(RelayError::Transport("estimate worker stopped".to_string())),
            ),
        };
        self.estimate_rx = None;

        let minutes = estimate.minutes;
        if let Some(form) = self.input_form.as_mut() {
            form.estimating = false;
            form.apply_estimate(estimate);
        }

        match err {
            Some(e) => {
                tracing::warn!(code = e.code(), "estimate failed, using heuristic");
                self.show_toast(
                    ToastKind::Error,
                    format!("{} Using a {} min guess.", e.user_message(), minutes),
                );
            }
            None => self.show_toast(ToastKind::Success, format!("AI estimate: {} min", minutes)),
        }
    }

    // ── Planner ───────────────────────────────────────────────

    /// Open the hour picker for the selected task
    pub fn start_schedule_selected(&mut self) {
        let Some(task) = self.selected_task() else {
            return;
        };
        self.schedule_form = Some(ScheduleFormState {
            hour: self.planner_hour,
            target: ScheduleTarget::Place {
                task_id: task.id.clone(),
            },
        });
        self.ui_mode = UiMode::Scheduling;
    }

    /// Open the hour picker for the planner entry under the cursor
    pub fn start_move_planner_entry(&mut self) {
        let Some(entry) = self.selected_planner_entry() else {
            return;
        };
        self.schedule_form = Some(ScheduleFormState {
            hour: entry.start_hour,
            target: ScheduleTarget::Move {
                task_id: entry.task_id.clone(),
                from_hour: entry.start_hour,
            },
        });
        self.ui_mode = UiMode::Scheduling;
    }

    pub fn schedule_form_up(&mut self) {
        if let Some(form) = &mut self.schedule_form {
            form.hour = form.hour.saturating_sub(1);
        }
    }

    pub fn schedule_form_down(&mut self) {
        if let Some(form) = &mut self.schedule_form {
            if form.hour + 1 < HOURS_PER_DAY {
                form.hour += 1;
            }
        }
    }

    pub fn submit_schedule_form(&mut self) {
        let Some(form) = self.schedule_form.take() else {
            return;
        };
        self.ui_mode = UiMode::Normal;

        let result = match &form.target {
            ScheduleTarget::Place { task_id } => self
                .planner
                .schedule(self.repo.tasks(), task_id, form.hour)
                .map(|entry| match entry {
                    Some(entry) => (ToastKind::Success, format!("Scheduled \"{}\" at {:02}:00", entry.task_title, form.hour)),
                    None => (ToastKind::Error, "Task not found".to_string()),
                }),
            ScheduleTarget::Move { task_id, from_hour } => self
                .planner
                .reschedule(task_id, *from_hour, form.hour)
                .map(|moved| match moved {
                    0 => (ToastKind::Error, "Nothing to move".to_string()),
                    _ => (ToastKind::Success, format!("Rescheduled to {:02}:00", form.hour)),
                }),
        };

        match result {
            Ok((kind, message)) => {
                self.planner_hour = form.hour;
                self.show_toast(kind, message);
            }
            Err(e) => self.report_error("Failed to save schedule", e),
        }
    }

    pub fn cancel_schedule_form(&mut self) {
        self.schedule_form = None;
        self.ui_mode = UiMode::Normal;
    }

    /// Remove the planner entry under the cursor
    pub fn unschedule_selected_entry(&mut self) {
        let Some(entry) = self.selected_planner_entry() else {
            return;
        };
        let (task_id, hour) = (entry.task_id.clone(), entry.start_hour);

        match self.planner.unschedule(&task_id, hour) {
            Ok(removed) if removed > 0 => self.show_toast(ToastKind::Info, "Removed from schedule"),
            Ok(_) => {}
            Err(e) => self.report_error("Failed to save schedule", e),
        }
    }

    // ── Pomodoro ──────────────────────────────────────────────

    pub fn toggle_pomodoro(&mut self) {
        self.pomodoro.toggle();
    }

    pub fn reset_pomodoro(&mut self) {
        self.pomodoro.reset();
    }

    pub fn cycle_pomodoro_mode(&mut self) {
        self.pomodoro.cycle_mode();
    }

    /// React to a finished Pomodoro phase
    pub fn handle_pomodoro_event(&mut self, event: PomodoroEvent) {
        match event {
            PomodoroEvent::WorkCompleted { completed, next } => {
                tracing::info!(completed, next = next.name(), "pomodoro completed");
                notifications::notify_pomodoro_complete(true);
                self.record_activity();
                self.show_toast(
                    ToastKind::Success,
                    format!("Pomodoro #{} done! Time for a {}.", completed, next.name().to_lowercase()),
                );
            }
            PomodoroEvent::BreakCompleted => {
                notifications::notify_pomodoro_complete(false);
                self.show_toast(ToastKind::Info, "Break complete! Ready to focus?");
            }
        }
    }

    // ── Timers ────────────────────────────────────────────────

    /// Advance every timer to `Instant::now()`
    pub fn tick(&mut self) {
        self.tick_at(Instant::now());
    }

    pub fn tick_at(&mut self, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_tick);
        self.last_tick = now;

        if self
            .toast
            .as_ref()
            .is_some_and(|t| ticker::is_due(t.created, now, ticker::toast_duration()))
        {
            self.toast = None;
        }

        if let Some(event) = self.pomodoro.advance(elapsed) {
            self.handle_pomodoro_event(event);
        }

        if ticker::is_due(self.last_quote_rotation, now, self.config.ui.quote_rotation()) {
            self.quote_index = (self.quote_index + 1) % crate::quotes::QUOTES.len();
            self.last_quote_rotation = now;
        }

        self.poll_estimate();
    }
}

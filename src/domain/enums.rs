/// UI mode for the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    /// Hour picker for placing or moving a planner entry
    Scheduling,
    Help,
    /// Three random productivity tips
    Tips,
}

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Tasks,
    Planner,
}

impl Focus {
    pub fn toggle(&self) -> Focus {
        match self {
            Focus::Tasks => Focus::Planner,
            Focus::Planner => Focus::Tasks,
        }
    }
}

/// Transient notification severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Info,
    Error,
}

impl ToastKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            ToastKind::Success => "✓",
            ToastKind::Info => "•",
            ToastKind::Error => "✗",
        }
    }
}

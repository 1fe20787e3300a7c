use crate::domain::Task;

/// Totals and rates over the task list
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub total_minutes: u32,
    pub completed_minutes: u32,
    pub remaining_minutes: u32,
    /// Completed tasks as a rounded percentage (0 with no tasks)
    pub completion_rate: u32,
    /// Completed minutes as a rounded percentage of all planned minutes
    pub time_completion_rate: u32,
    /// Rounded mean estimate per task
    pub average_task_minutes: u32,
}

/// Task counts by estimated duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationHistogram {
    /// Under 30 minutes
    pub quick: usize,
    /// 30 to 59 minutes
    pub short: usize,
    /// 60 to 119 minutes
    pub medium: usize,
    /// 120 minutes or more
    pub long: usize,
}

impl DurationHistogram {
    /// Labelled bins in display order
    pub fn bins(&self) -> [(&'static str, usize); 4] {
        [
            ("Quick (<30m)", self.quick),
            ("Short (30m-1h)", self.short),
            ("Medium (1-2h)", self.medium),
            ("Long (>2h)", self.long),
        ]
    }

    pub fn max_count(&self) -> usize {
        self.quick.max(self.short).max(self.medium).max(self.long)
    }
}

/// Qualitative rating of the completion rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceLevel {
    Excellent,
    Good,
    Fair,
    NeedsFocus,
}

impl PerformanceLevel {
    pub fn from_completion_rate(rate: u32) -> Self {
        match rate {
            80.. => PerformanceLevel::Excellent,
            60..=79 => PerformanceLevel::Good,
            40..=59 => PerformanceLevel::Fair,
            _ => PerformanceLevel::NeedsFocus,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "Excellent",
            PerformanceLevel::Good => "Good",
            PerformanceLevel::Fair => "Fair",
            PerformanceLevel::NeedsFocus => "Needs Focus",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceLevel::Excellent => "You're crushing it! Keep up the excellent work!",
            PerformanceLevel::Good => "Great progress! You're on the right track.",
            PerformanceLevel::Fair => "Good effort! Focus on completing remaining tasks.",
            PerformanceLevel::NeedsFocus => "Let's boost your productivity! Start with small wins.",
        }
    }
}

/// Rounded percentage, 0 when the denominator is 0
fn percent(part: u64, whole: u64) -> u32 {
    if whole == 0 {
        return 0;
    }
    ((part as f64 / whole as f64) * 100.0).round() as u32
}

/// Sum of estimates, saturating at `u32::MAX` for corrupt stored values
fn sum_minutes<'a>(tasks: impl Iterator<Item = &'a Task>) -> u32 {
    tasks.fold(0u32, |acc, t| acc.saturating_add(t.time_in_minutes))
}

/// Calculate totals and rates for `tasks`
pub fn calculate_task_stats(tasks: &[Task]) -> TaskStats {
    let total = tasks.len();
    let completed = tasks.iter().filter(|t| t.completed).count();

    let total_minutes = sum_minutes(tasks.iter());
    let completed_minutes = sum_minutes(tasks.iter().filter(|t| t.completed));

    let average_task_minutes = if total > 0 {
        (total_minutes as f64 / total as f64).round() as u32
    } else {
        0
    };

    TaskStats {
        total,
        completed,
        pending: total - completed,
        total_minutes,
        completed_minutes,
        remaining_minutes: total_minutes.saturating_sub(completed_minutes),
        completion_rate: percent(completed as u64, total as u64),
        time_completion_rate: percent(completed_minutes as u64, total_minutes as u64),
        average_task_minutes,
    }
}

/// Bin tasks by estimated duration
pub fn calculate_duration_histogram(tasks: &[Task]) -> DurationHistogram {
    let mut histogram = DurationHistogram::default();
    for task in tasks {
        match task.time_in_minutes {
            0..=29 => histogram.quick += 1,
            30..=59 => histogram.short += 1,
            60..=119 => histogram.medium += 1,
            _ => histogram.long += 1,
        }
    }
    histogram
}

/// Format minutes as "Xh Ym" or "Ym"
pub fn format_minutes(minutes: u32) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;
    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}

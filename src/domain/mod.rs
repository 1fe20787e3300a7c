pub mod enums;
pub mod error;
pub mod pomodoro;
pub mod schedule;
pub mod streak;
pub mod task;

pub use enums::{Focus, ToastKind, UiMode};
pub use error::ValidationError;
pub use pomodoro::{Pomodoro, PomodoroDurations, PomodoroEvent, TimerMode};
pub use schedule::{ScheduleFile, ScheduledTask, HOURS_PER_DAY};
pub use streak::{streak_badge, StreakData};
pub use task::{total_minutes, Task, MAX_TASK_MINUTES};

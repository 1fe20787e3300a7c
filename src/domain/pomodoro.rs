use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Pomodoro phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimerMode {
    Work,
    ShortBreak,
    LongBreak,
}

impl TimerMode {
    pub fn name(&self) -> &'static str {
        match self {
            TimerMode::Work => "Focus",
            TimerMode::ShortBreak => "Short Break",
            TimerMode::LongBreak => "Long Break",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TimerMode::Work => "🧠",
            TimerMode::ShortBreak | TimerMode::LongBreak => "☕",
        }
    }

    /// Next mode when cycling manually
    pub fn next(&self) -> TimerMode {
        match self {
            TimerMode::Work => TimerMode::ShortBreak,
            TimerMode::ShortBreak => TimerMode::LongBreak,
            TimerMode::LongBreak => TimerMode::Work,
        }
    }
}

/// Phase lengths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PomodoroDurations {
    pub work: Duration,
    pub short_break: Duration,
    pub long_break: Duration,
    /// Every n-th completed work session is followed by a long break
    pub long_break_every: u32,
}

impl Default for PomodoroDurations {
    fn default() -> Self {
        Self {
            work: Duration::from_secs(25 * 60),
            short_break: Duration::from_secs(5 * 60),
            long_break: Duration::from_secs(15 * 60),
            long_break_every: 4,
        }
    }
}

impl PomodoroDurations {
    pub fn for_mode(&self, mode: TimerMode) -> Duration {
        match mode {
            TimerMode::Work => self.work,
            TimerMode::ShortBreak => self.short_break,
            TimerMode::LongBreak => self.long_break,
        }
    }
}

/// Emitted when a phase runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PomodoroEvent {
    WorkCompleted { completed: u32, next: TimerMode },
    BreakCompleted,
}

/// Countdown timer alternating focus and break phases
#[derive(Debug, Clone)]
pub struct Pomodoro {
    pub mode: TimerMode,
    pub remaining: Duration,
    pub running: bool,
    pub completed_pomodoros: u32,
    durations: PomodoroDurations,
}

impl Pomodoro {
    pub fn new(durations: PomodoroDurations) -> Self {
        Self {
            mode: TimerMode::Work,
            remaining: durations.work,
            running: false,
            completed_pomodoros: 0,
            durations,
        }
    }

    /// Start or pause
    pub fn toggle(&mut self) {
        self.running = !self.running;
    }

    /// Stop and refill the current phase
    pub fn reset(&mut self) {
        self.running = false;
        self.remaining = self.durations.for_mode(self.mode);
    }

    /// Jump to `mode`, stopped and full
    pub fn switch_mode(&mut self, mode: TimerMode) {
        self.mode = mode;
        self.remaining = self.durations.for_mode(mode);
        self.running = false;
    }

    pub fn cycle_mode(&mut self) {
        self.switch_mode(self.mode.next());
    }

    /// Count down by `elapsed` while running. When the phase runs out the
    /// timer stops, moves to the following phase and reports what finished.
    pub fn advance(&mut self, elapsed: Duration) -> Option<PomodoroEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(elapsed);
        if !self.remaining.is_zero() {
            return None;
        }

        self.running = false;
        match self.mode {
            TimerMode::Work => {
                self.completed_pomodoros += 1;
                let every = self.durations.long_break_every.max(1);
                let next = if self.completed_pomodoros % every == 0 {
                    TimerMode::LongBreak
                } else {
                    TimerMode::ShortBreak
                };
                self.mode = next;
                self.remaining = self.durations.for_mode(next);
                Some(PomodoroEvent::WorkCompleted {
                    completed: self.completed_pomodoros,
                    next,
                })
            }
            TimerMode::ShortBreak | TimerMode::LongBreak => {
                self.mode = TimerMode::Work;
                self.remaining = self.durations.work;
                Some(PomodoroEvent::BreakCompleted)
            }
        }
    }

    /// Fraction of the current phase already elapsed (0.0 - 1.0)
    pub fn progress_ratio(&self) -> f64 {
        let total = self.durations.for_mode(self.mode).as_secs_f64();
        if total <= 0.0 {
            return 0.0;
        }
        (1.0 - self.remaining.as_secs_f64() / total).clamp(0.0, 1.0)
    }

    /// Remaining time as "MM:SS"
    pub fn remaining_formatted(&self) -> String {
        let secs = self.remaining.as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

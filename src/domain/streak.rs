use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Calendar date format used for `active_dates`
const DAY_FORMAT: &str = "%Y-%m-%d";

/// Persisted streak record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// RFC 3339 timestamp of the last recorded activity, empty if none
    pub last_activity_date: String,
    pub total_days: u32,
    pub active_dates: BTreeSet<String>,
}

impl StreakData {
    /// Local calendar day of the last recorded activity
    pub fn last_activity_day(&self) -> Option<NaiveDate> {
        if self.last_activity_date.is_empty() {
            return None;
        }
        DateTime::parse_from_rfc3339(&self.last_activity_date)
            .ok()
            .map(|dt| dt.with_timezone(&Local).date_naive())
    }

    /// Record activity at `now`. Returns false when activity was already
    /// recorded on the same calendar day.
    pub fn record_activity(&mut self, now: DateTime<Local>) -> bool {
        let today = now.date_naive();
        let last = self.last_activity_day();

        if last == Some(today) {
            return false;
        }

        let continues = match (last, today.pred_opt()) {
            (Some(last), Some(yesterday)) => last == yesterday,
            _ => false,
        };

        self.current_streak = if continues {
            self.current_streak.saturating_add(1)
        } else {
            1
        };
        self.longest_streak = self.longest_streak.max(self.current_streak);
        self.last_activity_date = now.to_rfc3339();
        self.active_dates.insert(today.format(DAY_FORMAT).to_string());
        self.total_days = self.total_days.saturating_add(1);
        true
    }

    /// Copy corrected for display on `today`: a streak whose last activity
    /// is older than yesterday shows as 0. Nothing is written back.
    pub fn display_status(&self, today: NaiveDate) -> StreakData {
        let Some(last) = self.last_activity_day() else {
            return self.clone();
        };

        let is_recent = last == today || today.pred_opt() == Some(last);
        if is_recent {
            self.clone()
        } else {
            StreakData {
                current_streak: 0,
                ..self.clone()
            }
        }
    }

    /// Whether activity was recorded on `day`
    pub fn was_active_on(&self, day: NaiveDate) -> bool {
        self.active_dates.contains(&day.format(DAY_FORMAT).to_string())
    }
}

/// Flame badge shown next to the current streak
pub fn streak_badge(current_streak: u32) -> &'static str {
    match current_streak {
        30.. => "🔥🔥🔥",
        7..=29 => "🔥🔥",
        3..=6 => "🔥",
        _ => "✨",
    }
}

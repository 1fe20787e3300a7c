use super::store::{load_json, save_json, KeyValueStore, STREAKS_KEY};
use crate::domain::StreakData;
use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate};
use std::sync::Arc;

/// Streak record backed by the store
pub struct StreakTracker {
    data: StreakData,
    store: Arc<dyn KeyValueStore>,
}

impl StreakTracker {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let data: StreakData = load_json(store.as_ref(), STREAKS_KEY)?;
        Ok(Self { data, store })
    }

    pub fn save(&self) -> Result<()> {
        save_json(self.store.as_ref(), STREAKS_KEY, &self.data)
    }

    /// Stored record, without the display correction
    pub fn data(&self) -> &StreakData {
        &self.data
    }

    /// Record activity for today. Returns whether the record changed.
    pub fn record_activity(&mut self) -> Result<bool> {
        self.record_activity_at(Local::now())
    }

    /// Record activity at `now`. The stored record is re-read first so a
    /// write from another process on the same day is not counted twice.
    pub fn record_activity_at(&mut self, now: DateTime<Local>) -> Result<bool> {
        self.data = load_json(self.store.as_ref(), STREAKS_KEY)?;
        if !self.data.record_activity(now) {
            return Ok(false);
        }

        self.save()?;
        tracing::info!(
            current = self.data.current_streak,
            longest = self.data.longest_streak,
            "activity recorded"
        );
        Ok(true)
    }

    /// Record corrected for display today. Nothing is written.
    pub fn load_status(&self) -> StreakData {
        self.status_on(Local::now().date_naive())
    }

    pub fn status_on(&self, today: NaiveDate) -> StreakData {
        self.data.display_status(today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::store::MemoryStore;
    use chrono::TimeZone;

    fn at(d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 5, d, 10, 0, 0).unwrap()
    }

    #[test]
    fn test_record_persists() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = StreakTracker::load(store.clone()).unwrap();

        assert!(tracker.record_activity_at(at(1)).unwrap());
        assert!(tracker.record_activity_at(at(2)).unwrap());

        let reloaded = StreakTracker::load(store).unwrap();
        assert_eq!(reloaded.data().current_streak, 2);
        assert_eq!(reloaded.data().total_days, 2);
    }

    #[test]
    fn test_twice_same_day_changes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = StreakTracker::load(store.clone()).unwrap();

        tracker.record_activity_at(at(1)).unwrap();
        let raw_before = store.get(STREAKS_KEY).unwrap();

        assert!(!tracker.record_activity_at(at(1)).unwrap());
        assert_eq!(tracker.data().total_days, 1);
        assert_eq!(tracker.data().current_streak, 1);
        assert_eq!(store.get(STREAKS_KEY).unwrap(), raw_before);
    }

    #[test]
    fn test_status_does_not_write() {
        let store = Arc::new(MemoryStore::new());
        let mut tracker = StreakTracker::load(store.clone()).unwrap();
        tracker.record_activity_at(at(1)).unwrap();
        let raw_before = store.get(STREAKS_KEY).unwrap();

        let today = NaiveDate::from_ymd_opt(2026, 5, 9).unwrap();
        assert_eq!(tracker.status_on(today).current_streak, 0);
        assert_eq!(tracker.data().current_streak, 1);
        assert_eq!(store.get(STREAKS_KEY).unwrap(), raw_before);
    }

    #[test]
    fn test_corrupt_record_starts_fresh() {
        let store = Arc::new(MemoryStore::new());
        store.set(STREAKS_KEY, "not json").unwrap();

        let mut tracker = StreakTracker::load(store).unwrap();
        assert_eq!(tracker.data(), &StreakData::default());
        assert!(tracker.record_activity_at(at(3)).unwrap());
        assert_eq!(tracker.data().current_streak, 1);
    }
}

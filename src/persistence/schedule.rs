use super::store::{load_json, save_json, KeyValueStore, SCHEDULE_KEY};
use crate::domain::{ScheduleFile, ScheduledTask, Task};
use anyhow::Result;
use std::sync::Arc;

/// The manual hour-grid schedule backed by the store
pub struct SchedulePlanner {
    schedule: ScheduleFile,
    store: Arc<dyn KeyValueStore>,
}

impl SchedulePlanner {
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let schedule: ScheduleFile = load_json(store.as_ref(), SCHEDULE_KEY)?;
        Ok(Self { schedule, store })
    }

    pub fn save(&self) -> Result<()> {
        save_json(self.store.as_ref(), SCHEDULE_KEY, &self.schedule)
    }

    pub fn schedule_file(&self) -> &ScheduleFile {
        &self.schedule
    }

    pub fn entries(&self) -> &[ScheduledTask] {
        &self.schedule.entries
    }

    /// Place a task. `Ok(None)` when the task id is unknown.
    pub fn schedule(&mut self, tasks: &[Task], task_id: &str, start_hour: u32) -> Result<Option<ScheduledTask>> {
        let entry = self.schedule.schedule(tasks, task_id, start_hour)?;
        if entry.is_some() {
            self.save()?;
        }
        Ok(entry)
    }

    pub fn reschedule(&mut self, task_id: &str, old_hour: u32, new_hour: u32) -> Result<usize> {
        let moved = self.schedule.reschedule(task_id, old_hour, new_hour)?;
        if moved > 0 {
            self.save()?;
        }
        Ok(moved)
    }

    pub fn unschedule(&mut self, task_id: &str, start_hour: u32) -> Result<usize> {
        let removed = self.schedule.unschedule(task_id, start_hour);
        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    pub fn hour_occupancy(&self, hour: u32) -> f64 {
        self.schedule.hour_occupancy(hour)
    }

    pub fn tasks_for_hour(&self, hour: u32) -> Vec<&ScheduledTask> {
        self.schedule.tasks_for_hour(hour)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use crate::persistence::store::MemoryStore;

    #[test]
    fn test_schedule_persists() {
        let store = Arc::new(MemoryStore::new());
        let tasks = vec![Task::new("Deep work", 120).unwrap()];
        let mut planner = SchedulePlanner::load(store.clone()).unwrap();

        planner.schedule(&tasks, &tasks[0].id, 9).unwrap();
        planner.reschedule(&tasks[0].id, 9, 10).unwrap();

        let reloaded = SchedulePlanner::load(store.clone()).unwrap();
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].start_hour, 10);
        assert_eq!(reloaded.hour_occupancy(11), 100.0);

        planner.unschedule(&tasks[0].id, 10).unwrap();
        let reloaded = SchedulePlanner::load(store).unwrap();
        assert!(reloaded.entries().is_empty());
    }

    #[test]
    fn test_unknown_task_writes_nothing() {
        let store = Arc::new(MemoryStore::new());
        let mut planner = SchedulePlanner::load(store.clone()).unwrap();

        assert!(planner.schedule(&[], "ghost", 9).unwrap().is_none());
        assert_eq!(store.get(SCHEDULE_KEY).unwrap(), None);
    }

    #[test]
    fn test_bad_hour_is_validation_error() {
        let store = Arc::new(MemoryStore::new());
        let tasks = vec![Task::new("Deep work", 120).unwrap()];
        let mut planner = SchedulePlanner::load(store).unwrap();

        let err = planner.schedule(&tasks, &tasks[0].id, 30).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::HourOutOfRange(30))
        );
    }
}

use super::error::ValidationError;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// Hours in the planner grid
pub const HOURS_PER_DAY: u32 = 24;

/// Placement of a task on the hour grid.
///
/// Title, duration and completion are snapshots taken when the task was
/// scheduled; they are not kept in sync with the task afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledTask {
    pub task_id: String,
    pub task_title: String,
    pub start_hour: u32,
    /// Minutes
    pub duration: u32,
    #[serde(default)]
    pub completed: bool,
}

impl ScheduledTask {
    pub fn from_task(task: &Task, start_hour: u32) -> Self {
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            start_hour,
            duration: task.time_in_minutes,
            completed: task.completed,
        }
    }

    /// Minutes of this entry that fall inside `hour`
    pub fn minutes_in_hour(&self, hour: u32) -> u32 {
        // Stored entries are not re-validated, so stay saturating
        let start = self.start_hour.saturating_mul(60);
        let end = start.saturating_add(self.duration);
        let slot_start = hour.saturating_mul(60);
        let slot_end = slot_start.saturating_add(60);

        let overlap_start = start.max(slot_start);
        let overlap_end = end.min(slot_end);
        overlap_end.saturating_sub(overlap_start)
    }

    /// Whether the `[start, start + duration)` interval touches `hour`
    pub fn covers_hour(&self, hour: u32) -> bool {
        self.minutes_in_hour(hour) > 0
    }
}

/// Validate a grid hour
pub fn check_hour(hour: u32) -> Result<u32, ValidationError> {
    if hour < HOURS_PER_DAY {
        Ok(hour)
    } else {
        Err(ValidationError::HourOutOfRange(hour))
    }
}

/// The manually curated day schedule.
///
/// Overlaps are allowed: several entries may claim the same hour and one task
/// may be placed more than once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleFile {
    pub entries: Vec<ScheduledTask>,
}

impl ScheduleFile {
    /// Place `task_id` at `start_hour`. Returns `Ok(None)` when the id does
    /// not name a known task.
    pub fn schedule(
        &mut self,
        tasks: &[Task],
        task_id: &str,
        start_hour: u32,
    ) -> Result<Option<ScheduledTask>, ValidationError> {
        let start_hour = check_hour(start_hour)?;
        let Some(task) = tasks.iter().find(|t| t.id == task_id) else {
            return Ok(None);
        };

        let entry = ScheduledTask::from_task(task, start_hour);
        self.entries.push(entry.clone());
        Ok(Some(entry))
    }

    /// Move every entry of `task_id` at `old_hour` to `new_hour`.
    /// Returns how many entries moved.
    pub fn reschedule(
        &mut self,
        task_id: &str,
        old_hour: u32,
        new_hour: u32,
    ) -> Result<usize, ValidationError> {
        let new_hour = check_hour(new_hour)?;
        let mut moved = 0;
        for entry in &mut self.entries {
            if entry.task_id == task_id && entry.start_hour == old_hour {
                entry.start_hour = new_hour;
                moved += 1;
            }
        }
        Ok(moved)
    }

    /// Remove every entry of `task_id` at `start_hour`. Returns how many
    /// entries were removed.
    pub fn unschedule(&mut self, task_id: &str, start_hour: u32) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|e| !(e.task_id == task_id && e.start_hour == start_hour));
        before - self.entries.len()
    }

    /// Entries whose interval covers `hour`
    pub fn tasks_for_hour(&self, hour: u32) -> Vec<&ScheduledTask> {
        self.entries.iter().filter(|e| e.covers_hour(hour)).collect()
    }

    /// Percentage of `hour` claimed by scheduled entries, in [0, 100].
    ///
    /// Contributions are summed and then capped, so overlapping entries
    /// under-report contention.
    pub fn hour_occupancy(&self, hour: u32) -> f64 {
        let minutes = self
            .entries
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.minutes_in_hour(hour)));
        (minutes as f64 / 60.0 * 100.0).min(100.0)
    }

    /// Tasks without any entry on the grid
    pub fn unscheduled_tasks<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks
            .iter()
            .filter(|t| !self.entries.iter().any(|e| e.task_id == t.id))
            .collect()
    }

    /// Entries belonging to `task_id`
    pub fn entries_for_task(&self, task_id: &str) -> Vec<&ScheduledTask> {
        self.entries.iter().filter(|e| e.task_id == task_id).collect()
    }

    pub fn total_scheduled_minutes(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |acc, e| acc.saturating_add(e.duration))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tasks() -> Vec<Task> {
        vec![
            Task::new("Deep work", 90).unwrap(),
            Task::new("Email", 20).unwrap(),
            Task::new("Gym", 60).unwrap(),
        ]
    }

    #[test]
    fn test_schedule_snapshots_task() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();

        let entry = schedule.schedule(&tasks, &tasks[0].id, 9).unwrap().unwrap();
        assert_eq!(entry.task_title, "Deep work");
        assert_eq!(entry.start_hour, 9);
        assert_eq!(entry.duration, 90);
        assert!(!entry.completed);
        assert_eq!(schedule.entries.len(), 1);
    }

    #[test]
    fn test_schedule_unknown_task_is_silent() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();

        assert_eq!(schedule.schedule(&tasks, "missing", 9), Ok(None));
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_schedule_rejects_bad_hour() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();

        assert_eq!(
            schedule.schedule(&tasks, &tasks[0].id, 24),
            Err(ValidationError::HourOutOfRange(24))
        );
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_reschedule_and_unschedule() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[1].id, 8).unwrap();

        assert_eq!(schedule.reschedule(&tasks[1].id, 8, 14), Ok(1));
        assert_eq!(schedule.entries[0].start_hour, 14);
        assert_eq!(schedule.reschedule(&tasks[1].id, 8, 15), Ok(0));

        assert_eq!(schedule.unschedule(&tasks[1].id, 8), 0);
        assert_eq!(schedule.unschedule(&tasks[1].id, 14), 1);
        assert!(schedule.is_empty());
    }

    #[test]
    fn test_occupancy_clips_to_hour() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        // 90 minutes from 09:00 covers all of 9 and half of 10
        schedule.schedule(&tasks, &tasks[0].id, 9).unwrap();

        assert_eq!(schedule.hour_occupancy(8), 0.0);
        assert_eq!(schedule.hour_occupancy(9), 100.0);
        assert_eq!(schedule.hour_occupancy(10), 50.0);
        assert_eq!(schedule.hour_occupancy(11), 0.0);
    }

    #[test]
    fn test_occupancy_is_capped() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        for task in &tasks {
            schedule.schedule(&tasks, &task.id, 9).unwrap();
        }
        schedule.schedule(&tasks, &tasks[0].id, 9).unwrap();

        for hour in 0..HOURS_PER_DAY {
            let pct = schedule.hour_occupancy(hour);
            assert!((0.0..=100.0).contains(&pct), "hour {hour}: {pct}");
        }
        assert_eq!(schedule.hour_occupancy(9), 100.0);
    }

    #[test]
    fn test_corrupt_entries_do_not_overflow() {
        let entry = |start_hour, duration| ScheduledTask {
            task_id: "x".to_string(),
            task_title: "Corrupt".to_string(),
            start_hour,
            duration,
            completed: false,
        };
        let schedule = ScheduleFile {
            entries: vec![entry(9, u32::MAX), entry(u32::MAX, 30), entry(9, u32::MAX)],
        };

        assert_eq!(schedule.hour_occupancy(8), 0.0);
        assert_eq!(schedule.hour_occupancy(9), 100.0);
        assert_eq!(schedule.hour_occupancy(23), 100.0);
        assert_eq!(schedule.total_scheduled_minutes(), u32::MAX);
        assert_eq!(schedule.tasks_for_hour(23).len(), 2);
    }

    #[test]
    fn test_occupancy_sums_partial_entries() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[1].id, 13).unwrap();
        schedule.schedule(&tasks, &tasks[1].id, 13).unwrap();

        // Two 20-minute entries
        let pct = schedule.hour_occupancy(13);
        assert!((pct - 66.666).abs() < 0.01);
    }

    #[test]
    fn test_tasks_for_hour() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[0].id, 9).unwrap();
        schedule.schedule(&tasks, &tasks[2].id, 10).unwrap();

        let titles: Vec<&str> = schedule
            .tasks_for_hour(10)
            .iter()
            .map(|e| e.task_title.as_str())
            .collect();
        assert_eq!(titles, vec!["Deep work", "Gym"]);
        assert!(schedule.tasks_for_hour(11).is_empty());
    }

    #[test]
    fn test_unscheduled_and_totals() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[0].id, 9).unwrap();
        schedule.schedule(&tasks, &tasks[0].id, 15).unwrap();

        let unscheduled: Vec<&str> = schedule
            .unscheduled_tasks(&tasks)
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(unscheduled, vec!["Email", "Gym"]);
        assert_eq!(schedule.total_scheduled_minutes(), 180);
        assert_eq!(schedule.entries_for_task(&tasks[0].id).len(), 2);
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let tasks = tasks();
        let mut schedule = ScheduleFile::default();
        schedule.schedule(&tasks, &tasks[1].id, 7).unwrap();

        let json = serde_json::to_value(&schedule).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["startHour"], 7);
        assert_eq!(json[0]["taskTitle"], "Email");
    }
}

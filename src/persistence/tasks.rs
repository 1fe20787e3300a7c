use super::store::{load_json, save_json, KeyValueStore, TASKS_KEY};
use crate::domain::Task;
use crate::report::stats::{calculate_task_stats, TaskStats};
use anyhow::Result;
use std::sync::Arc;

/// Owns the task list and mirrors it to the store after every mutation
pub struct TaskRepository {
    tasks: Vec<Task>,
    store: Arc<dyn KeyValueStore>,
}

impl TaskRepository {
    /// Load the persisted task list (empty if absent or unreadable)
    pub fn load(store: Arc<dyn KeyValueStore>) -> Result<Self> {
        let tasks: Vec<Task> = load_json(store.as_ref(), TASKS_KEY)?;
        Ok(Self { tasks, store })
    }

    /// Write the full task list
    pub fn save(&self) -> Result<()> {
        save_json(self.store.as_ref(), TASKS_KEY, &self.tasks)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Resolve a CLI reference: full id, unique id prefix, or 1-based position
    pub fn resolve(&self, reference: &str) -> Option<&Task> {
        let reference = reference.trim();
        if reference.is_empty() {
            return None;
        }

        if let Some(task) = self.get(reference) {
            return Some(task);
        }

        let by_position = reference
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|idx| self.tasks.get(idx));
        if by_position.is_some() {
            return by_position;
        }

        let mut matches = self.tasks.iter().filter(|t| t.id.starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(task), None) => Some(task),
            _ => None,
        }
    }

    /// Create and persist a task. Invalid input is refused before anything
    /// changes.
    pub fn add(
        &mut self,
        title: &str,
        minutes: u32,
        first_principles: Option<String>,
        steps: Option<Vec<String>>,
    ) -> Result<Task> {
        let task = Task::new(title, minutes)?.with_analysis(first_principles, steps);
        self.tasks.push(task.clone());
        self.save()?;
        tracing::debug!(id = %task.id, title = %task.title, "task added");
        Ok(task)
    }

    /// Flip completion. Returns the new state, or None if the id is unknown.
    pub fn toggle(&mut self, id: &str) -> Result<Option<bool>> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };

        task.completed = !task.completed;
        let completed = task.completed;
        self.save()?;
        Ok(Some(completed))
    }

    /// Remove by id. Returns whether a task was removed.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(false);
        }

        self.save()?;
        Ok(true)
    }

    /// Derived totals, recomputed on every call
    pub fn stats(&self) -> TaskStats {
        calculate_task_stats(&self.tasks)
    }
}

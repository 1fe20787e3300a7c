use super::error::ValidationError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Longest accepted estimate: one full day
pub const MAX_TASK_MINUTES: u32 = 24 * 60;

/// A unit of work with an estimated duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub time_in_minutes: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_principles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<String>>,
}

impl Task {
    /// Create a new, not yet completed task.
    ///
    /// The title is trimmed. An empty title, a zero estimate or one longer
    /// than a day is refused.
    pub fn new(title: &str, minutes: u32) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        if minutes == 0 {
            return Err(ValidationError::NonPositiveMinutes);
        }
        if minutes > MAX_TASK_MINUTES {
            return Err(ValidationError::TooManyMinutes(minutes));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            time_in_minutes: minutes,
            completed: false,
            first_principles: None,
            steps: None,
        })
    }

    /// Attach the analysis returned by the estimate relay
    pub fn with_analysis(mut self, first_principles: Option<String>, steps: Option<Vec<String>>) -> Self {
        self.first_principles = first_principles.filter(|s| !s.trim().is_empty());
        self.steps = steps.filter(|s| !s.is_empty());
        self
    }

    /// Short id used in CLI listings
    pub fn short_id(&self) -> &str {
        let end = self.id.len().min(8);
        &self.id[..end]
    }
}

/// Convert an hours/minutes pair from a form into total minutes
pub fn total_minutes(hours: u32, minutes: u32) -> u32 {
    hours.saturating_mul(60).saturating_add(minutes)
}

use thiserror::Error;

/// Input rejected before any state is touched
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title must not be empty")]
    EmptyTitle,
    #[error("estimated time must be greater than zero minutes")]
    NonPositiveMinutes,
    #[error("estimated time must be at most 24 hours (1440 minutes), got {0}")]
    TooManyMinutes(u32),
    #[error("start hour {0} is outside 0-23")]
    HourOutOfRange(u32),
}

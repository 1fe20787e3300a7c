use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// How long a toast stays in the status bar
pub const TOAST_SECS: u64 = 4;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

pub fn toast_duration() -> Duration {
    Duration::from_secs(TOAST_SECS)
}

/// Whether a periodic timer last fired at `last` is due again at `now`
pub fn is_due(last: std::time::Instant, now: std::time::Instant, every: Duration) -> bool {
    now.saturating_duration_since(last) >= every
}

//! Error types for the time-estimate relay.
//!
//! Each variant carries a stable code and the HTTP status the relay server
//! answers with. None of them is fatal: callers fall back to the heuristic
//! estimate or report the message.

/// Stable error codes, included in the Display output.
pub mod error_codes {
    pub const MISSING_TITLE: &str = "MISSING_TITLE";
    pub const NOT_CONFIGURED: &str = "NOT_CONFIGURED";
    pub const RATE_LIMITED: &str = "RATE_LIMITED";
    pub const QUOTA_EXHAUSTED: &str = "QUOTA_EXHAUSTED";
    pub const UPSTREAM_FAILED: &str = "UPSTREAM_FAILED";
    pub const TRANSPORT_FAILED: &str = "TRANSPORT_FAILED";
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    /// Empty or absent task title.
    #[error("[{}] task title is required", error_codes::MISSING_TITLE)]
    MissingTitle,

    /// No API key in the configured environment variable.
    #[error("[{}] AI service not configured", error_codes::NOT_CONFIGURED)]
    NotConfigured,

    /// Upstream answered 429.
    #[error("[{}] upstream rate limit exceeded", error_codes::RATE_LIMITED)]
    RateLimited,

    /// Upstream answered 402.
    #[error("[{}] upstream credits exhausted", error_codes::QUOTA_EXHAUSTED)]
    QuotaExhausted,

    /// Any other non-2xx upstream status.
    #[error("[{}] upstream returned HTTP {}", error_codes::UPSTREAM_FAILED, .0)]
    UpstreamStatus(u16),

    /// The request never got a response.
    #[error("[{}] {}", error_codes::TRANSPORT_FAILED, .0)]
    Transport(String),
}

impl RelayError {
    pub fn code(&self) -> &'static str {
        match self {
            RelayError::MissingTitle => error_codes::MISSING_TITLE,
            RelayError::NotConfigured => error_codes::NOT_CONFIGURED,
            RelayError::RateLimited => error_codes::RATE_LIMITED,
            RelayError::QuotaExhausted => error_codes::QUOTA_EXHAUSTED,
            RelayError::UpstreamStatus(_) => error_codes::UPSTREAM_FAILED,
            RelayError::Transport(_) => error_codes::TRANSPORT_FAILED,
        }
    }

    /// HTTP status the relay server responds with
    pub fn status(&self) -> u16 {
        match self {
            RelayError::MissingTitle => 400,
            RelayError::RateLimited => 429,
            RelayError::QuotaExhausted => 402,
            RelayError::NotConfigured
            | RelayError::UpstreamStatus(_)
            | RelayError::Transport(_) => 500,
        }
    }

    /// Message shown to the user in `{ "error": ... }` bodies and toasts
    pub fn user_message(&self) -> &'static str {
        match self {
            RelayError::MissingTitle => "Task title is required",
            RelayError::NotConfigured => "AI service not configured",
            RelayError::RateLimited => "Rate limit exceeded. Please try again in a moment.",
            RelayError::QuotaExhausted => "AI credits depleted. Please add credits to your workspace.",
            RelayError::UpstreamStatus(_) | RelayError::Transport(_) => "Failed to analyze task",
        }
    }
}

/// Map a non-success upstream status to a relay error
pub fn map_http_error(status: reqwest::StatusCode) -> RelayError {
    match status.as_u16() {
        429 => RelayError::RateLimited,
        402 => RelayError::QuotaExhausted,
        s => RelayError::UpstreamStatus(s),
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Transport(e.to_string())
    }
}

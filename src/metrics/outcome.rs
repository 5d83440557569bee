use std::time::Duration;

/// Result of a single request attempt. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The server answered. Any status code counts, including 4xx and 5xx.
    Success { latency: Duration, status: u16 },
    /// No response was obtained.
    Failure {
        latency: Option<Duration>,
        cause: String,
    },
}

impl RequestOutcome {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Success { status, .. } => Some(*status),
            Self::Failure { .. } => None,
        }
    }
}

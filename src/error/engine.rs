use thiserror::Error;

/// Failures a drive call can surface to its caller.
///
/// Transport failures are not part of this enum: they are absorbed by the
/// engine and counted as failed attempts.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("Behavior hook failed: {0}")]
    Hook(#[from] HookError),
}

impl EngineError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

/// A request that produced no HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out: {message}")]
    Timeout { message: String },
    #[error("connection failed: {message}")]
    Connect { message: String },
    #[error("failed to read response body: {message}")]
    Body { message: String },
    #[error("{message}")]
    Other { message: String },
}

impl TransportError {
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = err.to_string();
        if err.is_timeout() {
            Self::Timeout { message }
        } else if err.is_connect() {
            Self::Connect { message }
        } else if err.is_body() || err.is_decode() {
            Self::Body { message }
        } else {
            Self::Other { message }
        }
    }
}

/// Error raised by a caller-supplied behavior hook.
#[derive(Debug, Error)]
pub enum HookError {
    #[error("{0}")]
    Message(String),
    #[error("hook request failed: {0}")]
    Transport(#[from] TransportError),
    #[error("hook step '{step}' returned unexpected status {status}")]
    UnexpectedStatus { step: String, status: u16 },
}

impl From<&'static str> for HookError {
    fn from(value: &'static str) -> Self {
        HookError::Message(value.to_owned())
    }
}

impl From<String> for HookError {
    fn from(value: String) -> Self {
        HookError::Message(value)
    }
}

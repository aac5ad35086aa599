use std::time::Duration;

use thiserror::Error;

/// Reason a fetch cycle produced no [`Snapshot`](super::types::Snapshot).
///
/// The loop treats every variant the same way (degraded view, retry next
/// cycle); the variants only exist to give the operator a readable cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: status {0}")]
    Status(u16),

    #[error("JSON parse failed: {0}")]
    Decode(String),
}

impl FetchError {
    /// Human-readable cause shown in the degraded view.
    pub fn cause(&self) -> String {
        self.to_string()
    }
}

/// Invalid dashboard configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

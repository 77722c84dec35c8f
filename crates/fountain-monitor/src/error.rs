//! Monitor errors
//!
//! Running out of attempts is not an error; see [`crate::PollResult`].

use fountain_types::{FountainError, WalletStatus};
use thiserror::Error;

/// Result type for monitor operations
pub type MonitorResult<T> = std::result::Result<T, MonitorError>;

/// Errors returned by [`crate::DepositMonitor::poll`]
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Rejected before any query was made
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    /// The status provider failed; no further attempt was made
    #[error("Status query failed on attempt {attempt}: {source}")]
    Transport {
        attempt: u32,
        #[source]
        source: FountainError,
    },

    /// The caller cancelled while the monitor was waiting or querying
    #[error("Monitoring cancelled after {attempts_used} attempt(s)")]
    Cancelled {
        attempts_used: u32,
        last_status: Option<Box<WalletStatus>>,
    },
}

impl MonitorError {
    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Get an error code for logs and machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::Transport { source, .. } => source.error_code(),
            Self::Cancelled { .. } => "CANCELLED",
        }
    }

    /// The last status observed before the error, if any
    pub fn last_status(&self) -> Option<&WalletStatus> {
        match self {
            Self::Cancelled { last_status, .. } => last_status.as_deref(),
            _ => None,
        }
    }
}

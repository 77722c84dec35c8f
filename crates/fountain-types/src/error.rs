//! Error types for Fountain
//!
//! Every failure a status provider can report is an explicit variant here.

use thiserror::Error;

/// Result type for Fountain operations
pub type Result<T> = std::result::Result<T, FountainError>;

/// Fountain error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FountainError {
    // ========================================================================
    // Transport Errors
    // ========================================================================

    /// The API could not be reached
    #[error("Network error: {message}")]
    Network { message: String },

    /// The API answered with a non-2xx status
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The caller is not allowed to see this operation
    #[error("Unauthorized: {reason}")]
    Unauthorized { reason: String },

    /// The response body did not match the expected shape
    #[error("Decode error: {reason}")]
    Decode { reason: String },

    // ========================================================================
    // Operation Errors
    // ========================================================================

    /// The operation has no temporary wallet (burns, off-chain deposits)
    #[error("Operation {operation_id} has no temporary wallet")]
    NoTempWallet { operation_id: String },

    // ========================================================================
    // General Errors
    // ========================================================================

    /// Invalid input
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },
}

impl FountainError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an error from a non-2xx API response
    ///
    /// 401 and 403 become [`FountainError::Unauthorized`].
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::Unauthorized { reason: message },
            _ => Self::Api { status, message },
        }
    }

    /// Check if retrying the same request could succeed
    ///
    /// Advisory only. The deposit monitor never retries a failed query.
    pub fn is_retriable(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Get an error code for logs and machine-readable output
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Network { .. } => "NETWORK_ERROR",
            Self::Api { .. } => "API_ERROR",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::NoTempWallet { .. } => "NO_TEMP_WALLET",
            Self::InvalidInput { .. } => "INVALID_INPUT",
        }
    }
}

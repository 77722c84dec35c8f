//! Identity types for Fountain
//!
//! Operation identifiers are opaque to the client. The API hands out UUIDs
//! today, but nothing here depends on that.

use crate::{Result, FountainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a mint or burn operation tracked by the Fountain API
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OperationId(String);

impl OperationId {
    /// Parse an operation ID, rejecting empty or blank input
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FountainError::invalid_input(
                "operation_id",
                "must not be empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Get the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for OperationId {
    type Err = FountainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for OperationId {
    type Error = FountainError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl From<OperationId> for String {
    fn from(id: OperationId) -> Self {
        id.0
    }
}

impl AsRef<str> for OperationId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

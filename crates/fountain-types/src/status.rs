//! Deposit status snapshots
//!
//! A [`WalletStatus`] is what one poll of a temporary wallet returns. It is an
//! immutable snapshot: the monitor keeps only the latest one.

use crate::{FountainError, OperationId, Result};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of `progress_percent`
pub const MAX_PROGRESS_PERCENT: u8 = 100;

/// Deposit lifecycle as seen by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DepositStatus {
    /// Waiting for the first deposit
    Pending,
    /// Some funds received, more required
    Partial,
    /// Required amount received
    Complete,
    /// The operation ended without completing
    Expired,
}

impl DepositStatus {
    /// Map an operation status string reported by the API
    ///
    /// Returns `None` for values this client does not know about.
    pub fn from_operation_status(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" | "require_deposit" | "waiting_payment" => Some(Self::Pending),
            "partial_deposit" | "partial" => Some(Self::Partial),
            "deposit_confirmed" | "completed" | "complete" => Some(Self::Complete),
            "failed" | "cancelled" | "canceled" | "expired" => Some(Self::Expired),
            _ => None,
        }
    }

    /// No further progress is expected after a terminal status
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Expired)
    }

    /// Whether this status means the deposit succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Complete)
    }

    /// Display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Partial => "PARTIAL",
            Self::Complete => "COMPLETE",
            Self::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for DepositStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single deposit observed on a temporary wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositRecord {
    /// Amount credited
    pub amount: Decimal,
    /// Ledger transaction hash
    pub tx_hash: String,
    /// Timestamp as reported by the API
    pub timestamp: String,
}

/// Snapshot of a temporary wallet's deposit progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletStatus {
    /// Operation this wallet belongs to
    pub operation_id: OperationId,
    /// Temporary wallet address
    pub address: String,
    /// Ledger balance of the wallet
    pub current_balance: Decimal,
    /// Deposit progress, 0 to 100
    pub progress_percent: u8,
    /// Lifecycle status
    pub status: DepositStatus,
    /// Amount the operation needs, when known
    pub amount_required: Option<Decimal>,
    /// Amount credited so far
    pub amount_deposited: Decimal,
    /// Number of deposits received
    pub deposit_count: u32,
    /// Deposits received, oldest first
    pub deposit_history: Vec<DepositRecord>,
    /// When the client took this snapshot
    pub observed_at: DateTime<Utc>,
}

impl WalletStatus {
    /// Create a snapshot with no deposit bookkeeping
    ///
    /// `progress_percent` is clamped to 100.
    pub fn new(
        operation_id: OperationId,
        address: impl Into<String>,
        current_balance: Decimal,
        progress_percent: u8,
        status: DepositStatus,
    ) -> Self {
        Self {
            operation_id,
            address: address.into(),
            current_balance,
            progress_percent: progress_percent.min(MAX_PROGRESS_PERCENT),
            status,
            amount_required: None,
            amount_deposited: Decimal::ZERO,
            deposit_count: 0,
            deposit_history: Vec::new(),
            observed_at: Utc::now(),
        }
    }

    /// Attach required and deposited amounts
    pub fn with_amounts(mut self, required: Option<Decimal>, deposited: Decimal) -> Self {
        self.amount_required = required;
        self.amount_deposited = deposited;
        self
    }

    /// Attach the deposit history
    pub fn with_history(mut self, deposit_count: u32, history: Vec<DepositRecord>) -> Self {
        self.deposit_count = deposit_count;
        self.deposit_history = history;
        self
    }

    /// Terminal snapshots end monitoring
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Whether any funds have arrived
    pub fn has_progress(&self) -> bool {
        self.progress_percent > 0 || self.amount_deposited > Decimal::ZERO
    }

    /// Amount still missing, when the required amount is known
    pub fn amount_remaining(&self) -> Option<Decimal> {
        self.amount_required
            .map(|required| (required - self.amount_deposited).max(Decimal::ZERO))
    }
}

/// Parse a progress percentage as reported by the API (e.g. `"45.67"`)
///
/// The value is floored and clamped to `0..=100`; over-deposits report more
/// than 100.
pub fn parse_progress_percent(raw: &str) -> Result<u8> {
    let value = Decimal::from_str(raw.trim())
        .map_err(|e| FountainError::decode(format!("progress percent {raw:?}: {e}")))?;
    let clamped = value
        .floor()
        .clamp(Decimal::ZERO, Decimal::from(MAX_PROGRESS_PERCENT));
    clamped
        .to_u8()
        .ok_or_else(|| FountainError::decode(format!("progress percent {raw:?} out of range")))
}

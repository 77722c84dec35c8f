//! Response bodies of the Fountain operations API
//!
//! The temp-wallet endpoint mixes snake_case and camelCase keys and reports
//! numbers either as JSON numbers or as strings, so decoding is lenient.

use fountain_types::{
    parse_progress_percent, DepositRecord, DepositStatus, FountainError, OperationId, Result,
    WalletStatus,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// A number the API may send as a JSON number or a string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Numeric {
    Number(serde_json::Number),
    Text(String),
}

impl Numeric {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Parse as a decimal, accepting scientific notation
    pub fn to_decimal(&self) -> Option<Decimal> {
        let text = self.as_text();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }
}

/// `GET /api/v1/operations/{id}/temp-wallet`
#[derive(Debug, Clone, Deserialize)]
pub struct TempWalletResponse {
    #[serde(rename = "operationId", alias = "operation_id")]
    pub operation_id: Option<String>,
    #[serde(alias = "tempWalletAddress")]
    pub temp_wallet_address: Option<String>,
    #[serde(alias = "currentBalanceXrp")]
    pub current_balance_xrp: Option<Numeric>,
    #[serde(alias = "depositProgressPercent")]
    pub deposit_progress_percent: Option<Numeric>,
    #[serde(alias = "amountRequiredRlusd")]
    pub amount_required_rlusd: Option<Numeric>,
    #[serde(alias = "amountDepositedRlusd")]
    pub amount_deposited_rlusd: Option<Numeric>,
    #[serde(alias = "depositCount", default)]
    pub deposit_count: Option<u32>,
    #[serde(alias = "depositHistory", default)]
    pub deposit_history: Option<Vec<DepositEntry>>,
    pub status: Option<String>,
    pub error: Option<String>,
    pub message: Option<String>,
}

/// One element of `deposit_history`
#[derive(Debug, Clone, Deserialize)]
pub struct DepositEntry {
    pub amount: Option<Numeric>,
    #[serde(rename = "txHash", alias = "tx_hash", default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl TempWalletResponse {
    /// Convert into a [`WalletStatus`] for `operation_id`
    pub fn into_wallet_status(self, operation_id: &OperationId) -> Result<WalletStatus> {
        let address = match self.temp_wallet_address {
            Some(address) if !address.trim().is_empty() => address,
            _ => {
                return Err(FountainError::NoTempWallet {
                    operation_id: operation_id.to_string(),
                })
            }
        };

        let raw_status = self
            .status
            .ok_or_else(|| FountainError::decode("missing status"))?;
        let status = DepositStatus::from_operation_status(&raw_status).unwrap_or_else(|| {
            tracing::warn!(
                operation_id = %operation_id,
                status = %raw_status,
                "Unknown operation status, treating as pending"
            );
            DepositStatus::Pending
        });

        let progress_percent = match self.deposit_progress_percent {
            Some(raw) => parse_progress_percent(&raw.as_text())?,
            None => 0,
        };

        let current_balance = match self.current_balance_xrp.as_ref().map(|b| (b, b.to_decimal())) {
            Some((_, Some(balance))) => balance,
            Some((raw, None)) => {
                tracing::warn!(
                    operation_id = %operation_id,
                    balance = %raw.as_text(),
                    error = self.error.as_deref().unwrap_or(""),
                    "Wallet balance unavailable"
                );
                Decimal::ZERO
            }
            None => Decimal::ZERO,
        };

        let amount_required = self.amount_required_rlusd.as_ref().and_then(Numeric::to_decimal);
        let amount_deposited = self
            .amount_deposited_rlusd
            .as_ref()
            .and_then(Numeric::to_decimal)
            .unwrap_or(Decimal::ZERO);

        let history: Vec<DepositRecord> = self
            .deposit_history
            .unwrap_or_default()
            .into_iter()
            .map(|entry| DepositRecord {
                amount: entry
                    .amount
                    .as_ref()
                    .and_then(Numeric::to_decimal)
                    .unwrap_or(Decimal::ZERO),
                tx_hash: entry.tx_hash.unwrap_or_default(),
                timestamp: entry.timestamp.unwrap_or_default(),
            })
            .collect();
        let deposit_count = self
            .deposit_count
            .unwrap_or_else(|| u32::try_from(history.len()).unwrap_or(u32::MAX));

        Ok(WalletStatus::new(
            operation_id.clone(),
            address,
            current_balance,
            progress_percent,
            status,
        )
        .with_amounts(amount_required, amount_deposited)
        .with_history(deposit_count, history))
    }
}

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<serde_json::Value>,
    pub error: Option<String>,
}

impl ErrorBody {
    /// Best human-readable message from an error body, falling back to the raw text
    pub fn message_from(raw: &str) -> String {
        let parsed: Option<ErrorBody> = serde_json::from_str(raw).ok();
        let message = parsed.and_then(|body| match body.message {
            Some(serde_json::Value::String(s)) => Some(s),
            // validation errors arrive as an array of strings
            Some(serde_json::Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            _ => body.error,
        });
        message.unwrap_or_else(|| raw.trim().to_string())
    }
}

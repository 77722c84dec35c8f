//! The status-provider capability consumed by the monitor

use async_trait::async_trait;
use fountain_types::{OperationId, Result, WalletStatus};
use std::sync::Arc;

/// Something that can report a temporary wallet's deposit status
///
/// Implementations perform one query per call and must not retry
/// internally: the monitor owns the polling cadence.
#[async_trait]
pub trait StatusProvider: Send + Sync {
    /// Fetch the current status of an operation's temporary wallet
    async fn get_status(&self, operation_id: &OperationId) -> Result<WalletStatus>;
}

#[async_trait]
impl<P: StatusProvider + ?Sized> StatusProvider for Arc<P> {
    async fn get_status(&self, operation_id: &OperationId) -> Result<WalletStatus> {
        (**self).get_status(operation_id).await
    }
}

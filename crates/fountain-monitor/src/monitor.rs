//! The deposit polling loop

use crate::{MonitorConfig, MonitorError, MonitorResult, NoopObserver, PollObserver, StatusProvider};
use fountain_types::{DepositStatus, FountainError, OperationId, WalletStatus};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// How a poll ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollOutcome {
    /// The deposit reached COMPLETE
    Completed,
    /// The operation reached EXPIRED
    Expired,
    /// Attempts ran out before a terminal status
    Exhausted,
}

/// Terminal outcome of a poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollResult {
    /// Last status observed
    pub final_status: WalletStatus,
    /// Number of queries made, never more than `max_attempts`
    pub attempts_used: u32,
    /// True only when `final_status` is COMPLETE
    pub succeeded: bool,
}

impl PollResult {
    fn new(final_status: WalletStatus, attempts_used: u32) -> Self {
        Self {
            succeeded: final_status.status.is_success(),
            final_status,
            attempts_used,
        }
    }

    /// Classify the result
    pub fn outcome(&self) -> PollOutcome {
        match self.final_status.status {
            DepositStatus::Complete => PollOutcome::Completed,
            DepositStatus::Expired => PollOutcome::Expired,
            DepositStatus::Pending | DepositStatus::Partial => PollOutcome::Exhausted,
        }
    }

    /// Whether any funds arrived, for telling a partial timeout from an idle one
    pub fn made_progress(&self) -> bool {
        self.final_status.has_progress()
    }
}

/// Polls a temporary wallet until its deposit settles
pub struct DepositMonitor<P> {
    provider: P,
    observer: Arc<dyn PollObserver>,
}

impl<P: StatusProvider> DepositMonitor<P> {
    /// Create a monitor over a status provider
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            observer: Arc::new(NoopObserver),
        }
    }

    /// Report progress to an observer
    pub fn with_observer(mut self, observer: Arc<dyn PollObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Get the underlying provider
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Poll `operation_id` until it is terminal or `config.max_attempts` queries were made
    ///
    /// Waits `config.interval` between queries, never after the last one.
    /// A provider error ends the poll at once. Cancelling `cancel` aborts the
    /// current wait or query and returns [`MonitorError::Cancelled`].
    pub async fn poll(
        &self,
        operation_id: &OperationId,
        config: &MonitorConfig,
        cancel: &CancellationToken,
    ) -> MonitorResult<PollResult> {
        config.validate()?;

        let mut last: Option<WalletStatus> = None;
        let mut attempt = 0u32;

        loop {
            attempt += 1;

            let queried = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(cancelled(attempt - 1, last));
                }
                queried = self.provider.get_status(operation_id) => queried,
            };

            let status = match queried {
                Ok(status) => status,
                Err(source) => {
                    tracing::warn!(
                        operation_id = %operation_id,
                        attempt,
                        error = %source,
                        "Status query failed"
                    );
                    return Err(MonitorError::Transport { attempt, source });
                }
            };

            if let Some(prev) = &last {
                if status.progress_percent < prev.progress_percent {
                    tracing::warn!(
                        operation_id = %operation_id,
                        previous = prev.progress_percent,
                        current = status.progress_percent,
                        "Deposit progress went backwards"
                    );
                }
            }

            tracing::info!(
                operation_id = %operation_id,
                attempt,
                max_attempts = config.max_attempts,
                wallet = %status.address,
                balance = %status.current_balance,
                progress = status.progress_percent,
                status = %status.status,
                "Checked temporary wallet"
            );
            self.observer.on_attempt(attempt, config.max_attempts, &status);

            if status.is_terminal() || attempt >= config.max_attempts {
                let result = PollResult::new(status, attempt);
                tracing::info!(
                    operation_id = %operation_id,
                    attempts_used = result.attempts_used,
                    succeeded = result.succeeded,
                    outcome = ?result.outcome(),
                    "Deposit monitoring finished"
                );
                return Ok(result);
            }

            self.observer.on_wait(attempt + 1, config.interval);
            tracing::debug!(
                operation_id = %operation_id,
                delay = ?config.interval,
                "Waiting before next check"
            );

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(cancelled(attempt, Some(status)));
                }
                _ = tokio::time::sleep(config.interval) => {}
            }

            last = Some(status);
        }
    }

    /// Like [`DepositMonitor::poll`], parsing the operation ID first
    pub async fn poll_raw(
        &self,
        operation_id: &str,
        config: &MonitorConfig,
        cancel: &CancellationToken,
    ) -> MonitorResult<PollResult> {
        let operation_id = OperationId::parse(operation_id).map_err(|err| match err {
            FountainError::InvalidInput { field, reason } => MonitorError::InvalidInput { field, reason },
            other => MonitorError::invalid_input("operation_id", other.to_string()),
        })?;
        self.poll(&operation_id, config, cancel).await
    }
}

fn cancelled(attempts_used: u32, last_status: Option<WalletStatus>) -> MonitorError {
    tracing::info!(attempts_used, "Deposit monitoring cancelled");
    MonitorError::Cancelled {
        attempts_used,
        last_status: last_status.map(Box::new),
    }
}

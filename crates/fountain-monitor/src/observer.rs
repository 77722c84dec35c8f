//! Progress callbacks

use fountain_types::WalletStatus;
use std::time::Duration;

/// Receives progress from a running poll
///
/// Callbacks run inline on the polling task and should return quickly.
pub trait PollObserver: Send + Sync {
    /// Called after every successful query, terminal or not
    fn on_attempt(&self, _attempt: u32, _max_attempts: u32, _status: &WalletStatus) {}

    /// Called before waiting for the next attempt
    fn on_wait(&self, _next_attempt: u32, _delay: Duration) {}
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PollObserver for NoopObserver {}

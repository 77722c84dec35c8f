use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fountain_monitor::{
    CancellationToken, DepositMonitor, DepositStatus, MonitorConfig, MonitorError, OperationId,
    PollObserver, PollOutcome, StatusProvider, WalletStatus,
};
use fountain_types::{FountainError, Result};

/// Replays a fixed script of responses, then repeats `fallback` if set
struct ScriptedProvider {
    script: Mutex<VecDeque<Result<WalletStatus>>>,
    fallback: Option<WalletStatus>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    fn new(script: Vec<Result<WalletStatus>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            calls: AtomicU32::new(0),
        }
    }

    fn repeating(status: WalletStatus) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: Some(status),
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusProvider for ScriptedProvider {
    async fn get_status(&self, _operation_id: &OperationId) -> Result<WalletStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        match (next, &self.fallback) {
            (Some(response), _) => response,
            (None, Some(status)) => Ok(status.clone()),
            (None, None) => Err(FountainError::decode("script exhausted")),
        }
    }
}

#[derive(Default)]
struct RecordingObserver {
    progress: Mutex<Vec<(u32, u8)>>,
    waits: AtomicU32,
}

impl PollObserver for RecordingObserver {
    fn on_attempt(&self, attempt: u32, _max_attempts: u32, status: &WalletStatus) {
        self.progress.lock().unwrap().push((attempt, status.progress_percent));
    }

    fn on_wait(&self, _next_attempt: u32, _delay: Duration) {
        self.waits.fetch_add(1, Ordering::SeqCst);
    }
}

fn op() -> OperationId {
    OperationId::parse("3f6c2a0e-mint").unwrap()
}

fn status(progress: u8, status: DepositStatus) -> WalletStatus {
    let deposited = Decimal::from(progress);
    WalletStatus::new(op(), "rTempWallet1", deposited, progress, status)
        .with_amounts(Some(dec!(100)), deposited)
}

fn harness(provider: ScriptedProvider) -> (DepositMonitor<Arc<ScriptedProvider>>, Arc<ScriptedProvider>, Arc<RecordingObserver>) {
    let provider = Arc::new(provider);
    let observer = Arc::new(RecordingObserver::default());
    let monitor = DepositMonitor::new(provider.clone()).with_observer(observer.clone());
    (monitor, provider, observer)
}

#[tokio::test]
async fn test_completes_on_third_attempt() {
    let (monitor, provider, observer) = harness(ScriptedProvider::new(vec![
        Ok(status(30, DepositStatus::Pending)),
        Ok(status(70, DepositStatus::Pending)),
        Ok(status(100, DepositStatus::Complete)),
    ]));

    let result = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(3, 0), &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.succeeded);
    assert_eq!(result.attempts_used, 3);
    assert_eq!(result.final_status.progress_percent, 100);
    assert_eq!(result.outcome(), PollOutcome::Completed);
    assert_eq!(provider.calls(), 3);
    assert_eq!(*observer.progress.lock().unwrap(), vec![(1, 30), (2, 70), (3, 100)]);
}

#[tokio::test]
async fn test_exhausted_with_partial_progress() {
    let (monitor, provider, _) = harness(ScriptedProvider::new(vec![
        Ok(status(10, DepositStatus::Pending)),
        Ok(status(10, DepositStatus::Pending)),
    ]));

    let result = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(2, 0), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!result.succeeded);
    assert_eq!(result.attempts_used, 2);
    assert_eq!(result.final_status.progress_percent, 10);
    assert_eq!(result.outcome(), PollOutcome::Exhausted);
    assert!(result.made_progress());
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_complete_on_first_attempt_does_not_wait() {
    let (monitor, provider, observer) = harness(ScriptedProvider::repeating(status(100, DepositStatus::Complete)));
    let start = tokio::time::Instant::now();

    let result = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(5, 60), &CancellationToken::new())
        .await
        .unwrap();

    assert!(result.succeeded);
    assert_eq!(result.attempts_used, 1);
    assert_eq!(provider.calls(), 1);
    assert_eq!(observer.waits.load(Ordering::SeqCst), 0);
    assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_never_exceeds_max_attempts() {
    for max_attempts in 1..=6 {
        let (monitor, provider, observer) = harness(ScriptedProvider::repeating(status(0, DepositStatus::Pending)));
        let config = MonitorConfig::with_interval_secs(max_attempts, 5);
        let start = tokio::time::Instant::now();

        let result = monitor
            .poll(&op(), &config, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!result.succeeded);
        assert_eq!(result.attempts_used, max_attempts);
        assert_eq!(provider.calls(), max_attempts);
        assert!(!result.made_progress());
        // no wait after the final attempt
        assert_eq!(observer.waits.load(Ordering::SeqCst), max_attempts - 1);
        let elapsed = start.elapsed();
        assert!(elapsed >= config.max_wait());
        assert!(elapsed < config.max_wait() + Duration::from_secs(1));
    }
}

#[tokio::test]
async fn test_expired_stops_without_success() {
    let (monitor, provider, _) = harness(ScriptedProvider::new(vec![
        Ok(status(20, DepositStatus::Partial)),
        Ok(status(20, DepositStatus::Expired)),
        Ok(status(100, DepositStatus::Complete)),
    ]));

    let result = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(5, 0), &CancellationToken::new())
        .await
        .unwrap();

    assert!(!result.succeeded);
    assert_eq!(result.attempts_used, 2);
    assert_eq!(result.outcome(), PollOutcome::Expired);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_transport_error_propagates_immediately() {
    let (monitor, provider, _) = harness(ScriptedProvider::new(vec![
        Ok(status(10, DepositStatus::Pending)),
        Err(FountainError::network("connection reset by peer")),
        Ok(status(100, DepositStatus::Complete)),
    ]));

    let err = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(3, 0), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        MonitorError::Transport { attempt, source } => {
            assert_eq!(attempt, 2);
            assert_eq!(source, FountainError::network("connection reset by peer"));
        }
        other => panic!("Expected transport error, got {other:?}"),
    }
    assert_eq!(provider.calls(), 2);
}

#[tokio::test]
async fn test_api_error_on_first_attempt() {
    let (monitor, provider, observer) = harness(ScriptedProvider::new(vec![Err(
        FountainError::from_status(404, "Operation not found"),
    )]));

    let err = monitor
        .poll(&op(), &MonitorConfig::default(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, MonitorError::Transport { attempt: 1, .. }));
    assert_eq!(err.error_code(), "API_ERROR");
    assert_eq!(provider.calls(), 1);
    assert!(observer.progress.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_progress_regression_reports_latest() {
    let (monitor, _, observer) = harness(ScriptedProvider::new(vec![
        Ok(status(60, DepositStatus::Partial)),
        Ok(status(40, DepositStatus::Partial)),
    ]));

    let result = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(2, 0), &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(result.final_status.progress_percent, 40);
    assert_eq!(*observer.progress.lock().unwrap(), vec![(1, 60), (2, 40)]);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_wait() {
    let (monitor, provider, _) = harness(ScriptedProvider::repeating(status(25, DepositStatus::Partial)));
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(10)).await;
        trigger.cancel();
    });

    let err = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(3, 60), &cancel)
        .await
        .unwrap_err();

    match &err {
        MonitorError::Cancelled { attempts_used, .. } => assert_eq!(*attempts_used, 1),
        other => panic!("Expected cancellation, got {other:?}"),
    }
    assert_eq!(err.last_status().map(|s| s.progress_percent), Some(25));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_cancelled_before_first_query() {
    let (monitor, provider, _) = harness(ScriptedProvider::repeating(status(0, DepositStatus::Pending)));
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = monitor
        .poll(&op(), &MonitorConfig::default(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, MonitorError::Cancelled { attempts_used: 0, last_status: None }));
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_invalid_inputs_rejected_before_query() {
    let (monitor, provider, _) = harness(ScriptedProvider::repeating(status(0, DepositStatus::Pending)));
    let cancel = CancellationToken::new();

    let err = monitor
        .poll(&op(), &MonitorConfig::with_interval_secs(0, 1), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, MonitorError::InvalidInput { .. }));

    let err = monitor
        .poll_raw("   ", &MonitorConfig::default(), &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, MonitorError::InvalidInput { ref field, .. } if field == "operation_id"));

    assert_eq!(provider.calls(), 0);
}

/// Never answers within any reasonable test horizon
struct HangingProvider {
    calls: AtomicU32,
}

#[async_trait]
impl StatusProvider for HangingProvider {
    async fn get_status(&self, _operation_id: &OperationId) -> Result<WalletStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(status(100, DepositStatus::Complete))
    }
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_slow_query() {
    let provider = Arc::new(HangingProvider {
        calls: AtomicU32::new(0),
    });
    let monitor = DepositMonitor::new(provider.clone());
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(1)).await;
        trigger.cancel();
    });

    let start = tokio::time::Instant::now();
    let err = monitor
        .poll(&op(), &MonitorConfig::default(), &cancel)
        .await
        .unwrap_err();

    assert!(matches!(err, MonitorError::Cancelled { attempts_used: 0, last_status: None }));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    assert!(start.elapsed() < Duration::from_secs(60));
}

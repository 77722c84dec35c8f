//! Watch command - Monitor a temporary wallet until the deposit settles

use crate::display;
use anyhow::Context;
use colored::*;
use fountain_monitor::{
    CancellationToken, DepositMonitor, MonitorConfig, MonitorError, PollObserver, PollOutcome,
    PollResult,
};
use fountain_sdk::FountainClient;
use fountain_types::{OperationId, WalletStatus};
use std::sync::Arc;
use std::time::Duration;

/// Prints every check as it happens
struct ConsoleObserver;

impl PollObserver for ConsoleObserver {
    fn on_attempt(&self, attempt: u32, max_attempts: u32, status: &WalletStatus) {
        println!("{}", format!("Check {}/{}:", attempt, max_attempts).bright_white());
        display::wallet_status(status);
        println!();
    }

    fn on_wait(&self, _next_attempt: u32, delay: Duration) {
        display::info(&format!(
            "Waiting {} seconds before next check...",
            delay.as_secs_f64()
        ));
        println!();
    }
}

/// Poll an operation's temp wallet; returns whether the deposit completed
pub async fn watch(
    client: FountainClient,
    operation_id: OperationId,
    config: MonitorConfig,
    json: bool,
) -> anyhow::Result<bool> {
    let cancel = CancellationToken::new();
    let interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping monitor");
            interrupt.cancel();
        }
    });

    let mut monitor = DepositMonitor::new(client);
    if !json {
        monitor = monitor.with_observer(Arc::new(ConsoleObserver));
        display::section(&format!("Monitoring temporary wallet for {}", operation_id));
        display::kv("Endpoint", monitor.provider().endpoint());
        display::kv(
            "Checks",
            &format!("up to {} every {}s", config.max_attempts, config.interval.as_secs_f64()),
        );
        println!();
    }

    match monitor.poll(&operation_id, &config, &cancel).await {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&result);
            }
            Ok(result.succeeded)
        }
        Err(MonitorError::Cancelled {
            attempts_used,
            last_status,
        }) => {
            if json {
                let report = cancelled_report(attempts_used, last_status.as_deref());
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                display::warning(&format!("Cancelled after {} check(s)", attempts_used));
                if let Some(status) = last_status {
                    display::kv("Last progress", &format!("{}%", status.progress_percent));
                }
            }
            Ok(false)
        }
        Err(e) => Err(e).with_context(|| format!("Monitoring {} failed", operation_id)),
    }
}

/// JSON body printed when a watch is interrupted
fn cancelled_report(attempts_used: u32, last_status: Option<&WalletStatus>) -> serde_json::Value {
    serde_json::json!({
        "cancelled": true,
        "attempts_used": attempts_used,
        "last_status": last_status,
    })
}

fn print_summary(result: &PollResult) {
    let status = &result.final_status;
    match result.outcome() {
        PollOutcome::Completed => {
            display::success(&format!(
                "Deposit complete after {} check(s)",
                result.attempts_used
            ));
        }
        PollOutcome::Expired => {
            display::error(&format!(
                "Operation ended as {} at {}%",
                status.status, status.progress_percent
            ));
        }
        PollOutcome::Exhausted if result.made_progress() => {
            display::warning(&format!(
                "Deposit still {} at {}% after {} check(s)",
                status.status, status.progress_percent, result.attempts_used
            ));
            if let Some(remaining) = status.amount_remaining() {
                display::kv("Remaining", &format!("{} RLUSD", remaining));
            }
        }
        PollOutcome::Exhausted => {
            display::warning(&format!(
                "No deposit received after {} check(s)",
                result.attempts_used
            ));
        }
    }
    display::deposit_history(status);
}

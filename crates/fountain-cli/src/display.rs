//! Display utilities for the CLI

use colored::*;
use fountain_types::{DepositStatus, WalletStatus};

/// Print a section header
pub fn section(title: &str) {
    println!();
    println!("{}", "━".repeat(60).bright_black());
    println!(" {}", title.bright_white().bold());
    println!("{}", "━".repeat(60).bright_black());
}

/// Print a success message
pub fn success(message: &str) {
    println!("  {} {}", "✓".bright_green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    println!("  {} {}", "✗".bright_red(), message.bright_red());
}

/// Print an info message
pub fn info(message: &str) {
    println!("  {} {}", "→".bright_blue(), message);
}

/// Print a warning message
pub fn warning(message: &str) {
    println!("  {} {}", "⚠".yellow(), message.yellow());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("      {}: {}", key, value.bright_cyan());
}

/// Colored status label
pub fn status_label(status: DepositStatus) -> ColoredString {
    match status {
        DepositStatus::Pending => status.as_str().yellow(),
        DepositStatus::Partial => status.as_str().bright_blue(),
        DepositStatus::Complete => status.as_str().bright_green(),
        DepositStatus::Expired => status.as_str().bright_red(),
    }
}

/// Text progress bar, `width` cells wide
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (percent.min(100) as usize * width) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Print one wallet snapshot
pub fn wallet_status(status: &WalletStatus) {
    kv("Wallet", &status.address);
    kv("Balance", &format!("{} XRP", status.current_balance));
    println!(
        "      {}: {} {}%",
        "Progress",
        progress_bar(status.progress_percent, 20).bright_cyan(),
        status.progress_percent
    );
    if let Some(required) = status.amount_required {
        kv(
            "Deposited",
            &format!("{} of {} RLUSD", status.amount_deposited, required),
        );
    }
    println!("      {}: {}", "Status", status_label(status.status));
}

/// Print the deposit history, if any
pub fn deposit_history(status: &WalletStatus) {
    if status.deposit_history.is_empty() {
        return;
    }
    println!("      {} ({}):", "Deposits", status.deposit_count);
    for deposit in &status.deposit_history {
        println!(
            "        - {} {} {}",
            deposit.amount.to_string().bright_white(),
            deposit.tx_hash.bright_black(),
            deposit.timestamp.bright_black()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 4), "[░░░░]");
        assert_eq!(progress_bar(50, 4), "[██░░]");
        assert_eq!(progress_bar(100, 4), "[████]");
        assert_eq!(progress_bar(255, 4), "[████]");
    }
}

//! Status command - One-off temporary wallet check

use crate::display;
use anyhow::Context;
use colored::*;
use fountain_sdk::FountainClient;
use fountain_types::OperationId;

/// Print the current temp-wallet status of an operation
pub async fn show_status(client: &FountainClient, operation_id: &OperationId, json: bool) -> anyhow::Result<()> {
    let status = client
        .temp_wallet_status(operation_id)
        .await
        .with_context(|| format!("Failed to fetch temp wallet status for {}", operation_id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", format!("Operation {}", operation_id).bright_white().bold());
    println!("{}", "─".repeat(50));
    display::wallet_status(&status);
    display::deposit_history(&status);
    Ok(())
}

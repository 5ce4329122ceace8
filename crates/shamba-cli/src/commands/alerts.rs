//! Alerts command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ClientArgs;
use crate::host;
use crate::output;

#[derive(Args, Debug)]
pub struct AlertsArgs {
    /// Maximum number of alerts to return
    #[arg(long)]
    pub limit: Option<u32>,

    /// Output one JSON object per alert
    #[arg(long)]
    pub json: bool,
}

pub async fn run(args: AlertsArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::signed_in_client(client_args)?;

    let alerts = client
        .alerts(args.limit)
        .await
        .context("Failed to fetch alerts")?;

    if alerts.is_empty() {
        output::notice("No alerts.");
        return Ok(());
    }

    for alert in &alerts {
        if args.json {
            output::json_line(alert)?;
            continue;
        }

        let severity = alert.severity.as_deref().unwrap_or("info");
        let marker = match severity {
            "high" | "critical" => severity.red().bold(),
            "medium" | "warning" => severity.yellow(),
            _ => severity.normal(),
        };
        let title = alert.title.as_deref().unwrap_or("Alert");
        println!("[{}] {}: {}", marker, title.bold(), alert.message);
    }

    Ok(())
}

//! Chat history command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct ChatHistoryArgs {}

pub async fn run(_args: ChatHistoryArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::client(client_args, OnRejected::Notify)?;

    let turns = client
        .chat_history()
        .await
        .context("Failed to fetch chat history")?;

    if turns.is_empty() {
        output::notice("No conversation yet.");
        return Ok(());
    }

    for turn in &turns {
        let speaker = if turn.role == "user" {
            "you".cyan()
        } else {
            turn.role.as_str().green()
        };
        println!("{}: {}", speaker, turn.content);
    }

    Ok(())
}

//! Chat command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_http::ChatMessage;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct ChatArgs {
    /// Question for the assistant
    pub message: String,

    /// Reply language (en or sw)
    #[arg(long)]
    pub language: Option<String>,

    /// Continue an existing conversation
    #[arg(long)]
    pub conversation: Option<String>,
}

pub async fn run(args: ChatArgs, client_args: &ClientArgs) -> Result<()> {
    // Chat works without signing in.
    let client = host::client(client_args, OnRejected::Notify)?;

    let mut message = ChatMessage::new(args.message);
    if let Some(language) = args.language {
        message = message.in_language(language);
    }
    if let Some(id) = args.conversation {
        message = message.in_conversation(id);
    }

    let reply = client
        .send_chat(&message)
        .await
        .context("The assistant did not answer")?;

    println!("{}", reply.reply);
    if let Some(id) = &reply.conversation_id {
        eprintln!();
        output::notice(&format!("Conversation: {}", id));
    }

    Ok(())
}

//! CLI argument definitions.

use clap::{Args, Parser};

use crate::commands::Command;

/// Smart Shamba command-line client.
#[derive(Parser, Debug)]
#[command(name = "shamba")]
#[command(author, version = env!("SHAMBA_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub client: ClientArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command that talks to the backend.
#[derive(Args, Debug, Clone)]
pub struct ClientArgs {
    /// Backend base URL [env: SHAMBA_API_URL] [default: http://localhost:8000]
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds [env: SHAMBA_API_TIMEOUT] [default: 30]
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

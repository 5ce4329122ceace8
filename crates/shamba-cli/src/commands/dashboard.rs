//! Dashboard command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_core::Role;

use crate::cli::ClientArgs;
use crate::host;
use crate::output;

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Dashboard to show (defaults to your account's role)
    #[arg(long)]
    pub role: Option<String>,
}

pub async fn run(args: DashboardArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::signed_in_client(client_args)?;

    let role = match &args.role {
        Some(r) => r.parse::<Role>().context("Invalid --role")?,
        None => {
            client
                .current_user()
                .await
                .context("Failed to determine your role")?
                .user_type
        }
    };

    let dashboard = client
        .dashboard(role)
        .await
        .with_context(|| format!("Failed to load {} dashboard", role))?;

    output::json_pretty(&dashboard)
}

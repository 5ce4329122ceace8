//! Whoami command implementation.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Args;

use shamba_core::SESSION_KEY;

use crate::cli::ClientArgs;
use crate::host;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Fetch the profile from the backend
    #[arg(long)]
    pub remote: bool,
}

pub async fn run(args: WhoamiArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::signed_in_client(client_args)?;

    let record = host::token_store()?
        .load_record(SESSION_KEY)
        .context("Failed to read session file")?;

    output::field("Backend", client.config().base_url.as_str());
    if let Some(record) = record {
        let since = record.saved_at.with_timezone(&Local);
        output::field("Signed in", &since.format("%Y-%m-%d %H:%M").to_string());
    }

    if args.remote {
        let principal = client
            .current_user()
            .await
            .context("Failed to fetch profile")?;
        output::field("ID", &principal.id);
        output::field("Name", &principal.name);
        output::field("Phone", &principal.phone);
        output::field("Role", principal.user_type.as_str());
        output::field_opt("County", principal.county.as_deref());
        output::field_opt("Email", principal.email.as_deref());
        if principal.is_admin {
            output::field("Admin", "yes");
        }
    }

    Ok(())
}

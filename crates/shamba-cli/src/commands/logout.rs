//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(_args: LogoutArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::client(client_args, OnRejected::Silent)?;

    if !client.is_authenticated() {
        output::notice("Not signed in.");
        return Ok(());
    }

    // The local session is gone either way; a backend failure is only reported.
    if let Err(e) = client.logout().await {
        output::error(&format!("Backend did not confirm sign-out: {}", e.message()));
    }

    output::success("Signed out");
    Ok(())
}

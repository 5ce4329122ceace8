//! Login command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_core::Credentials;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Phone number, e.g. +254700000000
    #[arg(long)]
    pub phone: String,

    /// Account password
    #[arg(long)]
    pub password: String,
}

pub async fn run(args: LoginArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::client(client_args, OnRejected::Silent)?;
    let credentials = Credentials::new(&args.phone, &args.password);

    output::notice("Signing in...");

    let principal = client
        .login(&credentials)
        .await
        .context("Failed to sign in")?;

    output::success("Signed in successfully");
    println!();
    match principal {
        Some(p) => {
            output::field("Name", &p.name);
            output::field("Phone", &p.phone);
            output::field("Role", p.user_type.as_str());
        }
        None => output::field("Phone", credentials.phone()),
    }

    Ok(())
}

//! Register command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_core::{Registration, Role};

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Phone number, e.g. +254700000000
    #[arg(long)]
    pub phone: String,

    /// Account password
    #[arg(long)]
    pub password: String,

    /// Account role: farmer, buyer, or agrovet
    #[arg(long, default_value = "farmer")]
    pub role: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// County, e.g. Nakuru
    #[arg(long)]
    pub county: Option<String>,
}

pub async fn run(args: RegisterArgs, client_args: &ClientArgs) -> Result<()> {
    let role: Role = args.role.parse().context("Invalid --role")?;
    anyhow::ensure!(role != Role::Admin, "Admin accounts cannot be self-registered");

    let mut registration = Registration::new(&args.name, &args.phone, &args.password, role);
    if let Some(email) = &args.email {
        registration = registration.with_email(email);
    }
    if let Some(county) = &args.county {
        registration = registration.with_county(county);
    }

    let client = host::client(client_args, OnRejected::Silent)?;

    output::notice("Creating account...");

    let principal = client
        .register(&registration)
        .await
        .context("Failed to register")?;

    output::success("Account created and signed in");
    println!();
    output::field("Name", &args.name);
    output::field("Role", role.as_str());
    if let Some(p) = principal {
        output::field("ID", &p.id);
    }

    Ok(())
}

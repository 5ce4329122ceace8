//! Listings command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_http::ListingQuery;

use crate::cli::ClientArgs;
use crate::host::{self, OnRejected};
use crate::output;

#[derive(Args, Debug)]
pub struct ListingsArgs {
    /// Only show this crop
    #[arg(long)]
    pub crop: Option<String>,

    /// Only show this county
    #[arg(long)]
    pub county: Option<String>,

    /// Maximum number of listings to return
    #[arg(long)]
    pub limit: Option<u32>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

pub async fn run(args: ListingsArgs, client_args: &ClientArgs) -> Result<()> {
    let client = host::client(client_args, OnRejected::Notify)?;

    let query = ListingQuery {
        crop: args.crop,
        county: args.county,
        limit: args.limit,
    };

    let listings = client
        .listings(&query)
        .await
        .context("Failed to list marketplace offers")?;

    if listings.is_empty() {
        output::notice("No listings found.");
        return Ok(());
    }

    for listing in &listings {
        if args.pretty {
            output::json_pretty(listing)?;
        } else {
            output::json_line(listing)?;
        }
    }

    Ok(())
}

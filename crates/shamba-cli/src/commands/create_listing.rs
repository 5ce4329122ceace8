//! Create listing command implementation.

use anyhow::{Context, Result};
use clap::Args;

use shamba_http::NewListing;

use crate::cli::ClientArgs;
use crate::host;
use crate::output;

#[derive(Args, Debug)]
pub struct CreateListingArgs {
    /// Crop name, e.g. maize
    #[arg(long)]
    pub crop: String,

    /// Quantity on offer
    #[arg(long)]
    pub quantity: f64,

    /// Unit of the quantity, e.g. kg or bag
    #[arg(long, default_value = "kg")]
    pub unit: String,

    /// Price per unit in KES
    #[arg(long)]
    pub price: f64,

    /// County where the produce is
    #[arg(long)]
    pub county: Option<String>,

    /// Free-text description
    #[arg(long)]
    pub description: Option<String>,
}

pub async fn run(args: CreateListingArgs, client_args: &ClientArgs) -> Result<()> {
    anyhow::ensure!(args.quantity > 0.0, "--quantity must be positive");
    anyhow::ensure!(args.price >= 0.0, "--price must not be negative");

    let client = host::signed_in_client(client_args)?;

    let listing = NewListing {
        crop: args.crop,
        quantity: args.quantity,
        unit: args.unit,
        price_per_unit: args.price,
        county: args.county,
        description: args.description,
    };

    let created = client
        .create_listing(&listing)
        .await
        .context("Failed to create listing")?;

    output::success("Listing published");
    output::field("ID", &created.id);
    output::field("Crop", &created.crop);
    output::field(
        "Offer",
        &format!(
            "{} {} at KES {} per {}",
            created.quantity, created.unit, created.price_per_unit, created.unit
        ),
    );

    Ok(())
}

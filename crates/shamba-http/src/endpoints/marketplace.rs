//! Marketplace listings.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use shamba_core::de::string_or_number;
use shamba_core::{Envelope, Result};

use crate::client::ApiClient;
use crate::request::ApiRequest;

/// GET lists, POST creates.
pub const LISTINGS: &str = "/api/marketplace/listings";

/// A produce listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub crop: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub price_per_unit: f64,
    #[serde(default)]
    pub county: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub seller_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Filters for [`ApiClient::listings`].
#[derive(Debug, Clone, Default)]
pub struct ListingQuery {
    pub crop: Option<String>,
    pub county: Option<String>,
    pub limit: Option<u32>,
}

/// A listing to publish.
#[derive(Debug, Clone, Serialize)]
pub struct NewListing {
    pub crop: String,
    pub quantity: f64,
    pub unit: String,
    pub price_per_unit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ApiClient {
    /// List marketplace offers.
    #[instrument(skip(self))]
    pub async fn listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        let request = ApiRequest::get(LISTINGS)
            .query_opt("crop", query.crop.as_deref())
            .query_opt("county", query.county.as_deref())
            .query_opt("limit", query.limit);

        let envelope: Envelope<Vec<Listing>> = self.request_as(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    /// Publish a listing and return it as stored by the backend.
    #[instrument(skip(self, listing), fields(crop = %listing.crop))]
    pub async fn create_listing(&self, listing: &NewListing) -> Result<Listing> {
        let request = ApiRequest::post(LISTINGS).json(listing)?;
        let envelope: Envelope<Listing> = self.request_as(request).await?;
        envelope.into_data()
    }
}

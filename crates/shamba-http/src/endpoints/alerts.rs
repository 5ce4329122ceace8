//! Farm alerts.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use shamba_core::de::string_or_number;
use shamba_core::{Envelope, Result};

use crate::client::ApiClient;
use crate::request::ApiRequest;

pub const ALERTS: &str = "/api/alerts";

/// An alert raised for the signed-in user (bloom, weather, pest, market).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    pub message: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl ApiClient {
    /// Fetch recent alerts, newest first.
    #[instrument(skip(self))]
    pub async fn alerts(&self, limit: Option<u32>) -> Result<Vec<Alert>> {
        let request = ApiRequest::get(ALERTS).query_opt("limit", limit);
        let envelope: Envelope<Vec<Alert>> = self.request_as(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

//! Role dashboards.

use serde_json::Value;
use tracing::instrument;

use shamba_core::error::InvalidInputError;
use shamba_core::{Envelope, Result, Role};

use crate::client::ApiClient;
use crate::request::ApiRequest;

/// Returns the dashboard route for a role.
pub fn dashboard_path(role: Role) -> Result<&'static str> {
    match role {
        Role::Farmer => Ok("/api/farmer/dashboard"),
        Role::Buyer => Ok("/api/buyer/dashboard"),
        Role::Agrovet => Ok("/api/agrovet/dashboard"),
        Role::Admin => Ok("/api/admin/dashboard"),
        Role::Unknown => Err(InvalidInputError::Other {
            message: "no dashboard for an unknown role".to_string(),
        }
        .into()),
    }
}

impl ApiClient {
    /// Fetch the dashboard payload for `role`.
    ///
    /// The payload shape is owned by the backend and returned as JSON.
    #[instrument(skip(self))]
    pub async fn dashboard(&self, role: Role) -> Result<Value> {
        let path = dashboard_path(role)?;
        let envelope: Envelope<Value> = self.request_as(ApiRequest::get(path)).await?;
        envelope.into_data()
    }
}

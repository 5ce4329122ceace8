//! Login, registration, logout and profile.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use shamba_core::error::ProtocolError;
use shamba_core::{Credentials, Envelope, Principal, Registration, Result, SessionToken};

use crate::client::ApiClient;
use crate::request::ApiRequest;

/// POST: exchange credentials for a session.
pub const LOGIN: &str = "/api/auth/login";

/// POST: create an account and start a session.
pub const REGISTER: &str = "/api/auth/register";

/// POST: end the session on the backend.
pub const LOGOUT: &str = "/api/auth/logout";

/// GET: the signed-in profile.
pub const CURRENT_USER: &str = "/api/auth/me";

/// Response from login and registration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub session_token: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ApiClient {
    /// Sign in and store the issued session token.
    ///
    /// Returns the signed-in profile when the backend includes one.
    #[instrument(skip(self, credentials), fields(phone = %credentials.phone()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Option<Principal>> {
        let request = ApiRequest::post(LOGIN).json(credentials)?;
        let response: AuthResponse = self.request_as(request).await?;
        let principal = self.start_session(response)?;
        info!("Signed in");
        Ok(principal)
    }

    /// Create an account and store the issued session token.
    #[instrument(skip(self, registration), fields(phone = %registration.phone, role = %registration.user_type))]
    pub async fn register(&self, registration: &Registration) -> Result<Option<Principal>> {
        let request = ApiRequest::post(REGISTER).json(registration)?;
        let response: AuthResponse = self.request_as(request).await?;
        let principal = self.start_session(response)?;
        info!("Registered and signed in");
        Ok(principal)
    }

    /// End the session.
    ///
    /// The local session is cleared even when the backend call fails; that
    /// failure is still returned. Without a session no call is made.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        if !self.is_authenticated() {
            debug!("No session; nothing to log out");
            self.clear_session();
            return Ok(());
        }

        let result = self.request(ApiRequest::post(LOGOUT)).await;
        self.clear_session();
        info!("Signed out");
        result.map(|_| ())
    }

    /// Fetch the signed-in profile and refresh the cached copy.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<Principal> {
        let envelope: Envelope<Principal> =
            self.request_as(ApiRequest::get(CURRENT_USER)).await?;
        let principal = envelope.into_data()?;
        self.cache_principal(principal.clone());
        Ok(principal)
    }

    fn start_session(&self, response: AuthResponse) -> Result<Option<Principal>> {
        let token = response
            .session_token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| ProtocolError::new("authentication response has no session_token"))?;

        self.set_session(SessionToken::new(token));

        let principal = response.data.and_then(|data| {
            serde_json::from_value::<Principal>(data)
                .map_err(|e| warn!(error = %e, "Ignoring unrecognized profile in auth response"))
                .ok()
        });
        if let Some(principal) = &principal {
            self.cache_principal(principal.clone());
        }

        Ok(principal)
    }
}

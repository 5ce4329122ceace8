//! The authenticated API client.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, trace};

use shamba_core::envelope::{self, Outcome};
use shamba_core::{
    ClientConfig, Error, Host, HttpRequest, Navigator, Principal, Result, SessionToken, Transport,
};

use crate::request::ApiRequest;
use crate::session::SessionCache;
use crate::transport::ReqwestTransport;

/// Client for the Smart Shamba backend.
///
/// Every call goes through [`ApiClient::request`]: the session token, when
/// held, is attached as a bearer credential, and every response is checked
/// for failure before it reaches the caller. An HTTP 401 ends the session
/// (except on auth-optional routes) and asks the host to navigate to the
/// login entry point. Nothing is retried.
///
/// Build one client at startup and pass it to whatever needs it. Clones are
/// cheap and share the session.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    session: SessionCache,
    navigator: Option<Arc<dyn Navigator>>,
}

impl ApiClient {
    /// Create a client using the `reqwest` transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ClientConfig, host: Host) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, host, Arc::new(transport)))
    }

    /// Create a client over an arbitrary transport.
    pub fn with_transport(config: ClientConfig, host: Host, transport: Arc<dyn Transport>) -> Self {
        debug!(base_url = %config.base_url, ?host, "Creating API client");
        Self {
            inner: Arc::new(ClientInner {
                config,
                transport,
                session: SessionCache::new(host.store),
                navigator: host.navigator,
            }),
        }
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    // ========================================================================
    // Session
    // ========================================================================

    /// Returns the current session token, if any.
    pub fn session(&self) -> Option<SessionToken> {
        self.inner.session.get()
    }

    /// Store a new session token, replacing any previous one.
    pub fn set_session(&self, token: SessionToken) {
        self.inner.session.set(token);
    }

    /// Drop the session token and cached principal. Idempotent.
    pub fn clear_session(&self) {
        self.inner.session.clear();
    }

    /// Returns true if a session token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session().is_some()
    }

    /// Returns the cached profile of the signed-in user, for display only.
    pub fn principal(&self) -> Option<Principal> {
        self.inner.session.principal()
    }

    pub(crate) fn cache_principal(&self, principal: Principal) {
        self.inner.session.set_principal(principal);
    }

    // ========================================================================
    // Requests
    // ========================================================================

    /// Send a request and return the parsed response body.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] if no response was received
    /// - [`Error::Backend`] if the status is not 2xx or the envelope reports
    ///   `success: false`
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        let ApiRequest {
            method,
            path,
            body,
            query,
        } = request;

        let authorization = self.session().map(|t| t.bearer());
        debug!(authenticated = authorization.is_some(), "API request");

        let http = HttpRequest {
            method,
            url: self.inner.config.base_url.endpoint(&path),
            authorization,
            query,
            body,
        };

        let response = self.inner.transport.send(http).await.map_err(|e| {
            debug!(error = %e, "Transport failure");
            Error::from(e)
        })?;
        trace!(status = response.status, "API response");

        let outcome = envelope::classify(response.status, &response.body);
        if outcome.is_unauthorized() {
            self.on_unauthorized(&path);
        }
        if let Outcome::Failure { status, message } = &outcome {
            debug!(status, %message, "Backend reported failure");
        }

        outcome.into_result()
    }

    /// Send a request and deserialize the response body into `R`.
    pub async fn request_as<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        let body = self.request(request).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Apply the session-invalidation rule for an HTTP 401 on `path`.
    fn on_unauthorized(&self, path: &str) {
        if self.inner.config.auth_optional.contains(path) {
            debug!(path, "401 on auth-optional route; keeping session");
            return;
        }

        info!(path, "Session rejected by backend; signing out");
        self.clear_session();

        if let Some(navigator) = &self.inner.navigator {
            navigator.navigate(&self.inner.config.login_url);
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.config.base_url)
            .field("session", &self.inner.session)
            .field("navigator", &self.inner.navigator.is_some())
            .finish()
    }
}

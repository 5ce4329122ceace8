//! Client configuration.

use std::time::Duration;

use tracing::debug;

use crate::error::{Error, InvalidInputError};
use crate::types::{AuthOptionalRoutes, BaseUrl};

/// Environment variable holding the backend origin.
pub const ENV_API_URL: &str = "SHAMBA_API_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "SHAMBA_API_TIMEOUT";

/// Environment variable holding the login entry point.
pub const ENV_LOGIN_URL: &str = "SHAMBA_LOGIN_URL";

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Login entry point the host navigates to after the session is rejected.
pub const DEFAULT_LOGIN_URL: &str = "/login";

/// Settings read once when the client is built.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: BaseUrl,
    pub timeout: Duration,
    pub login_url: String,
    pub auth_optional: AuthOptionalRoutes,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: BaseUrl::default(),
            timeout: DEFAULT_TIMEOUT,
            login_url: DEFAULT_LOGIN_URL.to_string(),
            auth_optional: AuthOptionalRoutes::default(),
            user_agent: concat!("smart-shamba/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: BaseUrl) -> Self {
        Self {
            base_url,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.base_url = BaseUrl::new(url.trim())?;
        }

        if let Some(secs) = lookup(ENV_TIMEOUT).filter(|v| !v.trim().is_empty()) {
            config.timeout = parse_timeout(&secs)?;
        }

        if let Some(login) = lookup(ENV_LOGIN_URL).filter(|v| !v.trim().is_empty()) {
            config.login_url = login.trim().to_string();
        }

        debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded client configuration");
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_login_url(mut self, login_url: impl Into<String>) -> Self {
        self.login_url = login_url.into();
        self
    }

    pub fn with_auth_optional(mut self, routes: AuthOptionalRoutes) -> Self {
        self.auth_optional = routes;
        self
    }
}

/// Parse a timeout given in whole seconds.
pub fn parse_timeout(value: &str) -> Result<Duration, Error> {
    let secs: u64 = value.trim().parse().map_err(|_| InvalidInputError::Other {
        message: format!("timeout '{}' is not a whole number of seconds", value),
    })?;
    if secs == 0 {
        return Err(InvalidInputError::Other {
            message: "timeout must be at least one second".to_string(),
        }
        .into());
    }
    Ok(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, BaseUrl::default());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.login_url, "/login");
        assert!(config.auth_optional.contains("/api/chat"));
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (ENV_API_URL, "https://api.example.org"),
            (ENV_TIMEOUT, "5"),
            (ENV_LOGIN_URL, "https://app.example.org/login"),
        ]))
        .unwrap();
        assert_eq!(config.base_url.host(), Some("api.example.org"));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.login_url, "https://app.example.org/login");
    }

    #[test]
    fn blank_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup(&[(ENV_API_URL, "  ")])).unwrap();
        assert_eq!(config.base_url, BaseUrl::default());
    }

    #[test]
    fn rejects_bad_timeout() {
        assert!(ClientConfig::from_lookup(lookup(&[(ENV_TIMEOUT, "soon")])).is_err());
        assert!(parse_timeout("0").is_err());
    }
}

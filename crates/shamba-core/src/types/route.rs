//! Backend route types and the auth-optional route set.

use std::fmt;

use crate::error::{Error, InvalidInputError};

/// Routes that stay usable without a valid session.
pub const DEFAULT_AUTH_OPTIONAL_ROUTES: &[&str] = &["/api/chat", "/api/chatbot"];

/// A declared backend route, such as `/api/chat`.
///
/// Stored without a trailing slash; always starts with `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Route(String);

impl Route {
    /// Create a new route.
    ///
    /// # Errors
    ///
    /// Returns an error if the route is not absolute or carries a query.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        if !s.starts_with('/') {
            return Err(InvalidInputError::Route {
                value: s.to_string(),
                reason: "must start with '/'".to_string(),
            }
            .into());
        }
        if s.contains('?') || s.contains('#') {
            return Err(InvalidInputError::Route {
                value: s.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }
        Ok(Self(normalize(s).to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `path` is this route or lies beneath it.
    ///
    /// Matching is by whole path segments: `/api/chat` covers
    /// `/api/chat/history` but not `/api/chatroom`.
    pub fn covers(&self, path: &str) -> bool {
        let path = normalize(strip_query(path));
        if self.0 == "/" {
            return true;
        }
        match path.strip_prefix(self.0.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('/'),
            None => false,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn strip_query(path: &str) -> &str {
    path.split(['?', '#']).next().unwrap_or(path)
}

fn normalize(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// The central set of routes where an HTTP 401 must not end the session.
///
/// Chat endpoints tolerate anonymous or expired-session use, so a 401 from
/// them is reported to the caller without clearing the session or sending
/// the user back to login.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthOptionalRoutes {
    routes: Vec<Route>,
}

impl AuthOptionalRoutes {
    /// An empty set: every 401 ends the session.
    pub fn none() -> Self {
        Self { routes: Vec::new() }
    }

    /// Build a set from route strings.
    pub fn from_routes<I, S>(routes: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let routes = routes
            .into_iter()
            .map(Route::new)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { routes })
    }

    /// Add a route to the set.
    pub fn with(mut self, route: Route) -> Self {
        if !self.routes.contains(&route) {
            self.routes.push(route);
        }
        self
    }

    /// Returns true if a request to `path` is auth-optional.
    pub fn contains(&self, path: &str) -> bool {
        self.routes.iter().any(|r| r.covers(path))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }
}

impl Default for AuthOptionalRoutes {
    fn default() -> Self {
        Self {
            routes: DEFAULT_AUTH_OPTIONAL_ROUTES
                .iter()
                .map(|r| Route(r.to_string()))
                .collect(),
        }
    }
}

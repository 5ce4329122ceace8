//! Navigation capability.

/// Performs a full navigation to a URL, discarding in-memory UI state.
///
/// Invoked by the client when the backend rejects the session. Hosts with
/// nothing to navigate (tests, batch jobs) simply provide no navigator.
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}

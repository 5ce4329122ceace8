//! Host capabilities supplied to the client.

use std::fmt;
use std::sync::Arc;

use crate::traits::{Navigator, TokenStore};

/// What the embedding environment can do for the client.
///
/// Both capabilities are optional. Without a store the session lives in
/// memory only; without a navigator a rejected session is simply cleared.
#[derive(Clone, Default)]
pub struct Host {
    pub store: Option<Arc<dyn TokenStore>>,
    pub navigator: Option<Arc<dyn Navigator>>,
}

impl Host {
    /// A host with neither durable storage nor navigation.
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn with_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("store", &self.store.is_some())
            .field("navigator", &self.navigator.is_some())
            .finish()
    }
}

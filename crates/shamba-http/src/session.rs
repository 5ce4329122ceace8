//! In-memory session cache mirrored to durable storage.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use tracing::{debug, warn};

use shamba_core::{Principal, SESSION_KEY, SessionToken, TokenStore};

/// Holds the one active session token for a client.
///
/// Memory is authoritative. The store, when present, is a best-effort
/// mirror: write failures are logged and otherwise ignored. The first read
/// consults the store once and caches the result, including absence.
///
/// Every mutation holds the write lock across both the memory and the
/// storage step, so no reader observes one cleared without the other.
pub struct SessionCache {
    store: Option<Arc<dyn TokenStore>>,
    state: RwLock<CacheState>,
}

#[derive(Default)]
struct CacheState {
    token: Slot,
    principal: Option<Principal>,
}

#[derive(Default)]
enum Slot {
    #[default]
    Unloaded,
    Loaded(Option<SessionToken>),
}

impl SessionCache {
    pub fn new(store: Option<Arc<dyn TokenStore>>) -> Self {
        Self {
            store,
            state: RwLock::new(CacheState::default()),
        }
    }

    /// Returns true if a durable store backs this cache.
    pub fn is_persistent(&self) -> bool {
        self.store.is_some()
    }

    /// Returns the current token, loading it from storage on first use.
    pub fn get(&self) -> Option<SessionToken> {
        {
            let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
            if let Slot::Loaded(token) = &state.token {
                return token.clone();
            }
        }

        let mut state = self.write();
        // Another caller may have loaded it while we waited for the lock.
        if let Slot::Loaded(token) = &state.token {
            return token.clone();
        }

        let token = self.load_from_store();
        state.token = Slot::Loaded(token.clone());
        token
    }

    /// Replace the current token.
    pub fn set(&self, token: SessionToken) {
        let mut state = self.write();
        state.token = Slot::Loaded(Some(token.clone()));

        if let Some(store) = &self.store {
            match store.save(SESSION_KEY, token.as_str()) {
                Ok(()) => debug!("Session persisted"),
                Err(e) => warn!(error = %e, "Failed to persist session; keeping it in memory"),
            }
        }
    }

    /// Remove the token and the cached principal. Idempotent.
    pub fn clear(&self) {
        let mut state = self.write();
        state.token = Slot::Loaded(None);
        state.principal = None;

        if let Some(store) = &self.store
            && let Err(e) = store.remove(SESSION_KEY)
        {
            warn!(error = %e, "Failed to remove persisted session");
        }
    }

    /// Returns the cached principal, if one was recorded for this session.
    pub fn principal(&self) -> Option<Principal> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.principal.clone()
    }

    pub fn set_principal(&self, principal: Principal) {
        self.write().principal = Some(principal);
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn load_from_store(&self) -> Option<SessionToken> {
        let store = self.store.as_ref()?;
        match store.load(SESSION_KEY) {
            Ok(value) => {
                let token = value
                    .filter(|v| !v.trim().is_empty())
                    .map(SessionToken::new);
                debug!(found = token.is_some(), "Loaded session from storage");
                token
            }
            Err(e) => {
                warn!(error = %e, "Failed to read persisted session; treating as signed out");
                None
            }
        }
    }
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("persistent", &self.store.is_some())
            .field("token", &"[REDACTED]")
            .finish()
    }
}

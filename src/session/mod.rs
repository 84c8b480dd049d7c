// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session state shared by every request: the credential store, the
//! unauthorized observers, and the single in-flight refresh.

pub mod events;
pub mod refresh;
pub mod store;

pub use events::{SessionEvents, SubscriptionId, UNAUTHORIZED_EVENT};
pub use refresh::CoordinatedRefresh;
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Storage slot names.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
}

/// Access/refresh credential pair as issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Handle to the process-wide session.
///
/// Cheap to clone; all clones see the same store, observers and refresh slot.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn SessionStore>,
    events: SessionEvents,
    refresh: CoordinatedRefresh<String>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            events: SessionEvents::default(),
            refresh: CoordinatedRefresh::new(),
        }
    }

    /// Session backed by process memory only.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::default()))
    }

    /// Current access token, read from the store on every call.
    pub fn access_token(&self) -> Option<String> {
        self.store.get(keys::ACCESS_TOKEN)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(keys::REFRESH_TOKEN)
    }

    pub fn tokens(&self) -> Option<TokenPair> {
        Some(TokenPair {
            access_token: self.access_token()?,
            refresh_token: self.refresh_token()?,
        })
    }

    /// Persist a freshly issued credential pair as one store write.
    ///
    /// The pair is never split on disk: either both slots hold the new
    /// values or the store keeps the old pair (and logs the failure).
    pub fn store_tokens(&self, tokens: &TokenPair) {
        self.store.set_many(&[
            (keys::ACCESS_TOKEN, tokens.access_token.as_str()),
            (keys::REFRESH_TOKEN, tokens.refresh_token.as_str()),
        ]);
    }

    /// Drop both credentials without notifying observers (explicit logout).
    pub fn clear(&self) {
        self.store
            .clear_many(&[keys::ACCESS_TOKEN, keys::REFRESH_TOKEN]);
    }

    /// Irrecoverable session failure: clear credentials, then notify observers.
    pub fn expire(&self) {
        self.clear();
        tracing::warn!(event = UNAUTHORIZED_EVENT, "Session expired, credentials cleared");
        self.events.emit_unauthorized();
    }

    /// Register a handler for the unauthorized signal.
    pub fn on_unauthorized<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.events.on_unauthorized(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    pub fn events(&self) -> &SessionEvents {
        &self.events
    }

    /// The shared refresh slot used by the auth layer.
    pub fn refresh(&self) -> &CoordinatedRefresh<String> {
        &self.refresh
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Observer list for the `auth:unauthorized` signal.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Name of the signal, used in logs.
pub const UNAUTHORIZED_EVENT: &str = "auth:unauthorized";

/// Handle returned by [`SessionEvents::on_unauthorized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Observers {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, Handler)>>,
}

/// Shared list of unauthorized handlers. Clones share the same list.
#[derive(Clone, Default)]
pub struct SessionEvents {
    inner: Arc<Observers>,
}

impl SessionEvents {
    pub fn on_unauthorized<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        self.inner.handlers.write().push((id, Arc::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.inner.handlers.write();
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    /// Invoke every handler synchronously, in registration order.
    pub fn emit_unauthorized(&self) {
        // Snapshot so a handler may subscribe/unsubscribe without deadlocking
        let handlers: Vec<Handler> = self
            .inner
            .handlers
            .read()
            .iter()
            .map(|(_, h)| h.clone())
            .collect();

        tracing::debug!(
            event = UNAUTHORIZED_EVENT,
            observers = handlers.len(),
            "Broadcasting"
        );
        for handler in handlers {
            handler();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.handlers.read().len()
    }
}

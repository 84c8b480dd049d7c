// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! At-most-one in-flight refresh.
//!
//! Every caller that needs a new credential goes through
//! [`CoordinatedRefresh::run_once`]. The first caller starts the attempt on
//! its own tokio task; everyone arriving while it runs awaits the same shared
//! future. Because the attempt lives on a spawned task, dropping any caller
//! (including the one that started it) never cancels it for the others.

use crate::error::ApiError;
use futures_util::future::{BoxFuture, FutureExt, Shared};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;

type InFlight<T> = Shared<BoxFuture<'static, Result<T, ApiError>>>;

/// Empties the slot when the attempt settles, including on panic.
struct ClearOnDrop<T>(Arc<Mutex<Option<InFlight<T>>>>);

impl<T> Drop for ClearOnDrop<T> {
    fn drop(&mut self) {
        self.0.lock().take();
    }
}

/// Single-flight slot for a fallible async operation.
pub struct CoordinatedRefresh<T> {
    slot: Arc<Mutex<Option<InFlight<T>>>>,
}

impl<T> Clone for CoordinatedRefresh<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Default for CoordinatedRefresh<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CoordinatedRefresh<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Whether an attempt is currently running.
    pub fn is_in_flight(&self) -> bool {
        self.slot.lock().is_some()
    }

    /// Join the running attempt, or start one with `start` if none is running.
    ///
    /// `start` is only called when this caller wins the slot. The slot is
    /// emptied as soon as the attempt settles, before waiters observe the
    /// result, so the next failure can start a fresh attempt.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn run_once<F, Fut>(&self, start: F) -> Result<T, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let attempt = {
            let mut slot = self.slot.lock();
            match slot.as_ref() {
                Some(running) => {
                    tracing::debug!("Joining in-flight refresh");
                    running.clone()
                }
                None => {
                    // Spawned while the slot is held: the task cannot clear the
                    // slot before it has been registered.
                    let attempt = self.spawn_attempt(start());
                    *slot = Some(attempt.clone());
                    attempt
                }
            }
        };

        attempt.await
    }

    fn spawn_attempt<Fut>(&self, fut: Fut) -> InFlight<T>
    where
        Fut: Future<Output = Result<T, ApiError>> + Send + 'static,
    {
        let clear = ClearOnDrop(Arc::clone(&self.slot));
        let task = tokio::spawn(async move {
            let outcome = fut.await;
            drop(clear);
            outcome
        });

        task.map(|joined| match joined {
            Ok(outcome) => outcome,
            Err(e) => Err(ApiError::SessionExpired(format!(
                "refresh task did not complete: {}",
                e
            ))),
        })
        .boxed()
        .shared()
    }
}

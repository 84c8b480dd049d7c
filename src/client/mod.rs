// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Authenticated client for the admin backend.
//!
//! Layering:
//! - [`transport::HttpTransport`] talks HTTP and nothing else
//! - [`auth::with_auth_retry`] adds bearer credentials and refresh-and-retry
//! - [`ApiClient`] classifies statuses into [`ApiError`] and decodes bodies

pub mod auth;
pub mod request;
pub mod transport;

pub use auth::{with_auth_retry, AuthRetry, REFRESH_PATH};
pub use request::{ApiRequest, FormPart, RawResponse, RequestBody, ResponseBody, ResponseKind};
pub use transport::{HttpTransport, Transport};

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Envelope, MaybeEnveloped};
use crate::session::Session;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Client every resource service goes through.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    session: Session,
}

impl ApiClient {
    /// Client for the configured backend using the real HTTP transport.
    pub fn new(config: &Config, session: Session) -> Result<Self, ApiError> {
        let http = HttpTransport::from_config(config)?;
        Ok(Self::with_transport(
            Arc::new(http),
            session,
            config.refresh_timeout,
        ))
    }

    /// Client over an arbitrary transport (which gets wrapped with auth).
    pub fn with_transport(
        transport: Arc<dyn Transport>,
        session: Session,
        refresh_timeout: Duration,
    ) -> Self {
        let authed = with_auth_retry(transport, session.clone(), refresh_timeout);
        Self {
            transport: Arc::new(authed),
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Send a request and return its parsed body.
    ///
    /// Non-2xx responses become [`ApiError::Unauthorized`] (401) or
    /// [`ApiError::Upstream`] (everything else) with the body intact.
    pub async fn send(&self, request: ApiRequest) -> Result<ResponseBody, ApiError> {
        let kind = request.response_kind();
        let method = request.method().clone();
        let path = request.path().to_string();

        let response = self.transport.execute(&request).await?;
        match response.into_result() {
            Ok(ok) => ok.into_body(kind),
            Err(e) => {
                tracing::debug!(method = %method, path = %path, error = %e, "Request failed");
                Err(e)
            }
        }
    }

    /// Send and decode the whole JSON body as `T`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.send(request).await?.into_json()
    }

    /// Send and decode `T` from the `{ "data": T }` envelope.
    pub async fn send_data<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let envelope: Envelope<T> = self.send_json(request).await?;
        Ok(envelope.data)
    }

    /// Decode `T` whether or not the backend wrapped it in `{ "data": ... }`.
    pub async fn send_unwrapped<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let payload: MaybeEnveloped<T> = self.send_json(request).await?;
        Ok(payload.into_inner())
    }

    /// Send and ignore whatever 2xx body comes back.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request.binary()).await.map(|_| ())
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_unwrapped(ApiRequest::get(path)).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_unwrapped(ApiRequest::post(path).json(body)?)
            .await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_unwrapped(ApiRequest::put(path).json(body)?).await
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send_unit(ApiRequest::delete(path)).await
    }

    /// Fetch a binary body (exports).
    pub async fn get_bytes(&self, request: ApiRequest) -> Result<Bytes, ApiError> {
        Ok(self.send(request.binary()).await?.into_bytes())
    }
}

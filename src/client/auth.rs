// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Bearer credentials and transparent session refresh.
//!
//! [`with_auth_retry`] wraps any [`Transport`] so that:
//! - every request carries `Authorization: Bearer <access>` when the store
//!   has an access token, and no Authorization header otherwise;
//! - a 401 on a request that has not been replayed yet triggers one
//!   coordinated refresh followed by exactly one replay;
//! - a 401 on the refresh call itself, or any refresh failure, ends the
//!   session (credentials cleared, `auth:unauthorized` emitted once).
//!
//! Nothing else is retried.

use super::request::{ApiRequest, RawResponse};
use super::transport::Transport;
use crate::error::ApiError;
use crate::models::Envelope;
use crate::session::{Session, TokenPair};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Path of the credential refresh endpoint.
pub const REFRESH_PATH: &str = "/auth/refresh";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct RefreshData {
    tokens: TokenPair,
}

/// Transport decorator adding bearer auth and refresh-and-retry.
pub struct AuthRetry {
    inner: Arc<dyn Transport>,
    session: Session,
    refresh_timeout: Duration,
}

/// Wrap `inner` with the session's credentials and refresh policy.
pub fn with_auth_retry(
    inner: Arc<dyn Transport>,
    session: Session,
    refresh_timeout: Duration,
) -> AuthRetry {
    AuthRetry {
        inner,
        session,
        refresh_timeout,
    }
}

impl AuthRetry {
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// New access token from the shared in-flight refresh (started if needed).
    async fn fresh_access_token(&self) -> Result<String, ApiError> {
        let inner = Arc::clone(&self.inner);
        let session = self.session.clone();
        let timeout = self.refresh_timeout;

        self.session
            .refresh()
            .run_once(move || refresh_session(inner, session, timeout))
            .await
    }
}

#[async_trait::async_trait]
impl Transport for AuthRetry {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let mut request = request.clone();
        if let Some(token) = self.session.access_token() {
            request.set_bearer(&token)?;
        }

        let response = self.inner.execute(&request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        if request.is_retried() {
            return Ok(response.mark_retried());
        }

        if is_refresh_call(&request) {
            tracing::warn!(path = request.path(), "Refresh call was rejected");
            self.session.expire();
            return Ok(response);
        }

        request.mark_retried();
        tracing::info!(
            method = %request.method(),
            path = request.path(),
            "Access token rejected, refreshing session"
        );

        let access_token = self.fresh_access_token().await?;
        request.set_bearer(&access_token)?;

        let retry = self.inner.execute(&request).await?;
        tracing::debug!(
            path = request.path(),
            status = retry.status().as_u16(),
            "Replayed request after refresh"
        );
        Ok(retry.mark_retried())
    }
}

fn is_refresh_call(request: &ApiRequest) -> bool {
    request.path().trim_end_matches('/') == REFRESH_PATH
}

/// One refresh attempt, run on the coordinated slot.
///
/// On success both new credentials are persisted before the access token is
/// returned. Every failure (no refresh token, rejected, malformed, timed out)
/// ends the session and surfaces as `SessionExpired`.
async fn refresh_session(
    inner: Arc<dyn Transport>,
    session: Session,
    timeout: Duration,
) -> Result<String, ApiError> {
    let outcome = match tokio::time::timeout(timeout, exchange_refresh_token(&*inner, &session))
        .await
    {
        Ok(outcome) => outcome,
        Err(_) => Err(ApiError::SessionExpired(format!(
            "refresh timed out after {:?}",
            timeout
        ))),
    };

    match outcome {
        Ok(tokens) => {
            session.store_tokens(&tokens);
            tracing::info!("Session refreshed");
            Ok(tokens.access_token)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Session refresh failed");
            session.expire();
            Err(match e {
                ApiError::SessionExpired(_) => e,
                other => ApiError::SessionExpired(other.to_string()),
            })
        }
    }
}

async fn exchange_refresh_token(
    inner: &dyn Transport,
    session: &Session,
) -> Result<TokenPair, ApiError> {
    let refresh_token = session
        .refresh_token()
        .ok_or_else(|| ApiError::SessionExpired("no refresh token stored".to_string()))?;

    let request = ApiRequest::post(REFRESH_PATH).json(&RefreshRequest {
        refresh_token: &refresh_token,
    })?;

    let response = inner.execute(&request).await?.into_result()?;
    let envelope: Envelope<RefreshData> = response.json()?;
    Ok(envelope.data.tokens)
}

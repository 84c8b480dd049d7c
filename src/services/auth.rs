// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telegram deep-link login, current user, logout.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::auth::MeResponse;
use crate::models::{LoginInit, LoginStatus, UserProfile};

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Start a login: the user opens the returned deep link in Telegram.
    pub async fn initiate_login(&self) -> Result<LoginInit, ApiError> {
        self.api
            .send_data(ApiRequest::post("/auth/login/initiate"))
            .await
    }

    /// Poll a pending login. Once authorized, the issued tokens are stored in
    /// the session so subsequent calls are authenticated.
    pub async fn check_login_status(&self, login_token: &str) -> Result<LoginStatus, ApiError> {
        let status: LoginStatus = self
            .api
            .send_data(ApiRequest::get(format!(
                "/auth/login/status/{}",
                segment(login_token)
            )))
            .await?;

        if status.authorized {
            if let Some(tokens) = &status.tokens {
                self.api.session().store_tokens(tokens);
                tracing::info!(
                    user_id = status.user.as_ref().map(|u| u.id.as_str()).unwrap_or(""),
                    "Login authorized, session stored"
                );
            }
        }
        Ok(status)
    }

    pub async fn me(&self) -> Result<UserProfile, ApiError> {
        let me: MeResponse = self.api.send_data(ApiRequest::get("/auth/me")).await?;
        Ok(me.user)
    }

    /// Log out on the server; local credentials are cleared either way.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let result = self.api.send_unit(ApiRequest::post("/auth/logout")).await;
        self.api.session().clear();
        if let Err(e) = &result {
            tracing::warn!(error = %e, "Server logout failed, local session cleared anyway");
        }
        result
    }
}

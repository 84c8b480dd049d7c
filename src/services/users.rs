// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Account administration: roles, bans.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{PageParams, Paginated, Role, UserProfile};
use serde::Serialize;

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

#[derive(Serialize)]
struct BanBody<'a> {
    reason: &'a str,
}

#[derive(Clone)]
pub struct UserAdminService {
    api: ApiClient,
}

impl UserAdminService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn list(&self, page: &PageParams) -> Result<Paginated<UserProfile>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/admin/users").page(page))
            .await
    }

    pub async fn details(&self, user_id: &str) -> Result<UserProfile, ApiError> {
        self.api
            .get(&format!("/admin/users/{}", segment(user_id)))
            .await
    }

    pub async fn update_role(&self, user_id: &str, role: Role) -> Result<(), ApiError> {
        if role == Role::Other {
            return Err(ApiError::InvalidRequest(
                "cannot assign an unrecognized role".to_string(),
            ));
        }

        tracing::info!(user_id, role = %role, "Updating user role");
        self.api
            .send_unit(
                ApiRequest::put(format!("/admin/users/{}/role", segment(user_id)))
                    .json(&RoleBody { role })?,
            )
            .await
    }

    pub async fn ban(&self, user_id: &str, reason: &str) -> Result<(), ApiError> {
        tracing::info!(user_id, "Banning user");
        self.api
            .send_unit(
                ApiRequest::post(format!("/admin/users/{}/ban", segment(user_id)))
                    .json(&BanBody { reason })?,
            )
            .await
    }

    pub async fn unban(&self, user_id: &str) -> Result<(), ApiError> {
        tracing::info!(user_id, "Unbanning user");
        self.api
            .send_unit(ApiRequest::post(format!(
                "/admin/users/{}/unban",
                segment(user_id)
            )))
            .await
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Admin roster: who holds the ADMIN and SUPPORT roles.
//!
//! The roster is a view over `/admin/users`; granting and revoking are role
//! changes on the matching account.

use super::UserAdminService;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{PageParams, Role, UserProfile};

/// How many accounts one roster lookup scans.
const ROSTER_PAGE_SIZE: u32 = 100;

#[derive(Clone)]
pub struct AdminRosterService {
    users: UserAdminService,
}

impl AdminRosterService {
    pub fn new(api: ApiClient) -> Self {
        Self {
            users: UserAdminService::new(api),
        }
    }

    /// Current staff holding a roster role.
    pub async fn staff(&self) -> Result<Vec<UserProfile>, ApiError> {
        let page = self.users.list(&PageParams::new(ROSTER_PAGE_SIZE, 0)).await?;
        Ok(page
            .data
            .into_iter()
            .filter(|user| user.role.is_roster_role())
            .collect())
    }

    /// Find an account by username (case-insensitive, leading `@` optional)
    /// or by Telegram id.
    pub async fn find(&self, who: &str) -> Result<Option<UserProfile>, ApiError> {
        let page = self.users.list(&PageParams::new(ROSTER_PAGE_SIZE, 0)).await?;
        Ok(page.data.into_iter().find(|user| matches_user(user, who)))
    }

    /// Give the account named by `who` the ADMIN or SUPPORT role.
    pub async fn grant(&self, who: &str, role: Role) -> Result<UserProfile, ApiError> {
        if !role.is_roster_role() {
            return Err(ApiError::InvalidRequest(format!(
                "roster role must be ADMIN or SUPPORT, got {}",
                role
            )));
        }
        if who.trim().trim_start_matches('@').is_empty() {
            return Err(ApiError::InvalidRequest(
                "username or Telegram id is required".to_string(),
            ));
        }

        let user = self.find(who).await?.ok_or_else(|| {
            ApiError::InvalidRequest(format!("no user matches {}", who.trim()))
        })?;

        tracing::info!(user_id = %user.id, role = %role, "Granting roster role");
        self.users.update_role(&user.id, role).await?;
        Ok(user)
    }

    /// Take a roster role away by demoting the account to USER.
    pub async fn revoke(&self, user_id: &str) -> Result<(), ApiError> {
        tracing::info!(user_id, "Revoking roster role");
        self.users.update_role(user_id, Role::User).await
    }
}

fn matches_user(user: &UserProfile, who: &str) -> bool {
    let who = who.trim();
    let name = who.trim_start_matches('@');
    let by_username = user
        .username
        .as_deref()
        .is_some_and(|username| username.eq_ignore_ascii_case(name));
    by_username || user.telegram_id == who
}

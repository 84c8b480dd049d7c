//! Telegram deep-link login flow payloads.

use super::user::UserProfile;
use crate::session::TokenPair;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of `POST /auth/login/initiate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginInit {
    pub login_token: String,
    pub deep_link: String,
    pub code: String,
    #[serde(default)]
    pub codes: Vec<String>,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the login token expires
    pub expires_in: u64,
}

/// Result of polling `GET /auth/login/status/{token}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginStatus {
    pub authorized: bool,
    pub tokens: Option<TokenPair>,
    pub user: Option<UserProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MeResponse {
    pub user: UserProfile,
}

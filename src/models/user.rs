//! Staff and marketplace user accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account role as the backend spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Plain account with no marketplace or staff role
    User,
    Advertiser,
    BotOwner,
    Moderator,
    Support,
    Admin,
    SuperAdmin,
    /// Any role this client does not know about yet
    #[serde(other)]
    Other,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Advertiser => "ADVERTISER",
            Role::BotOwner => "BOT_OWNER",
            Role::Moderator => "MODERATOR",
            Role::Support => "SUPPORT",
            Role::Admin => "ADMIN",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Other => "OTHER",
        }
    }

    /// Whether the role may use the admin console at all.
    pub fn is_staff(&self) -> bool {
        matches!(
            self,
            Role::Moderator | Role::Support | Role::Admin | Role::SuperAdmin
        )
    }

    /// Roles listed on, and grantable through, the admin roster.
    pub fn is_roster_role(&self) -> bool {
        matches!(self, Role::Admin | Role::Support)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "USER" => Ok(Role::User),
            "ADVERTISER" => Ok(Role::Advertiser),
            "BOT_OWNER" => Ok(Role::BotOwner),
            "MODERATOR" => Ok(Role::Moderator),
            "SUPPORT" => Ok(Role::Support),
            "ADMIN" => Ok(Role::Admin),
            "SUPER_ADMIN" => Ok(Role::SuperAdmin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User profile as returned by `/auth/me` and `/admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: String,
    /// Telegram user id (string on the wire)
    pub telegram_id: String,
    pub role: Role,
    /// Additional roles, when the backend grants more than one
    #[serde(default)]
    pub roles: Vec<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Fields this client does not model (balance, ban state, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

//! Contact-form messages sent to support.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactStatus {
    New,
    Read,
    Resolved,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSender {
    pub id: String,
    pub first_name: String,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: String,
    pub user_id: Option<String>,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: ContactStatus,
    pub created_at: DateTime<Utc>,
    pub user: Option<ContactSender>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactMessages {
    pub messages: Vec<ContactMessage>,
    #[serde(default)]
    pub total: u64,
}

impl ContactMessages {
    /// Accepts `{messages,total}`, `{data:{messages,total}}` and
    /// `{data:[...], total}`.
    pub fn from_value(body: Value) -> Result<Self, serde_json::Error> {
        if body.get("messages").is_some() {
            return serde_json::from_value(body);
        }
        if let Some(inner) = body.get("data").filter(|d| d.get("messages").is_some()) {
            return serde_json::from_value(inner.clone());
        }

        let messages = match body.get("data") {
            Some(list @ Value::Array(_)) => serde_json::from_value(list.clone())?,
            _ => Vec::new(),
        };
        let total = body.get("total").and_then(Value::as_u64).unwrap_or(0);
        Ok(Self { messages, total })
    }
}

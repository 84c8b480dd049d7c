//! Advertisements under moderation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AdStatus {
    Draft,
    PendingReview,
    Active,
    Paused,
    Completed,
    Rejected,
    Archived,
    #[serde(other)]
    Other,
}

/// Advertisement record. Only the fields the console acts on are typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    pub status: AdStatus,
    pub title: Option<String>,
    pub text: Option<String>,
    pub content_type: Option<String>,
    pub media_url: Option<String>,
    pub cpm_bid: Option<f64>,
    pub target_impressions: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One row of `/ads/stats/overview` (`data.stats[]`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdStatsRow {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub active_ads: u64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub spent: f64,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ReasonBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct InstructionBody<'a> {
    pub instruction: &'a str,
}

//! Dashboard figures.
//!
//! The admin dashboard has no endpoint of its own: its numbers are folded
//! together from the ads overview and the pricing stats. Both bodies are
//! loosely shaped; missing or malformed figures read as zero.

use super::ad::AdStatsRow;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub active_ads: u64,
    pub impressions: u64,
    pub clicks: u64,
    pub spent: f64,
    /// Click-through rate in percent, two decimals
    pub ctr: f64,
    pub total_revenue: f64,
    pub platform_earnings: f64,
    pub platform_fee_percentage: f64,
}

impl AdminStats {
    /// Fold overview rows and the raw pricing-stats body into dashboard totals.
    ///
    /// `active_ads` is the peak over the rows; impressions, clicks and spend
    /// are summed.
    pub fn aggregate(rows: &[AdStatsRow], pricing: &Value) -> Self {
        let mut stats = rows.iter().fold(Self::default(), |mut acc, row| {
            acc.active_ads = acc.active_ads.max(row.active_ads);
            acc.impressions += row.impressions;
            acc.clicks += row.clicks;
            acc.spent += row.spent;
            acc
        });

        stats.ctr = if stats.impressions > 0 {
            round2(stats.clicks as f64 / stats.impressions as f64 * 100.0)
        } else {
            0.0
        };

        let pricing = match pricing.get("data") {
            Some(inner) if !inner.is_null() => inner,
            _ => pricing,
        };
        stats.total_revenue = first_number(pricing, &["totalRevenue", "revenue"]);
        stats.platform_earnings = first_number(pricing, &["platformEarnings", "earnings"]);
        stats.platform_fee_percentage =
            first_number(pricing, &["platformFeePercentage", "feePercentage"]);
        stats
    }
}

/// Extract `data.stats[]` from an `/ads/stats/overview` body; anything
/// unexpected yields no rows.
pub fn overview_rows(body: &Value) -> Vec<AdStatsRow> {
    body.pointer("/data/stats")
        .cloned()
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    pub name: String,
    pub value: f64,
    pub revenue: Option<f64>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// `dd.mm`
    pub date: String,
    pub impressions: u64,
    pub spent: f64,
    pub clicks: u64,
}

impl ChartPoint {
    pub fn from_row(row: &AdStatsRow) -> Self {
        Self {
            date: chart_label(row.date.as_deref()),
            impressions: row.impressions,
            spent: row.spent,
            clicks: row.clicks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalytics {
    pub categories: Vec<CategoryShare>,
    pub chart_data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvertiserOverview {
    pub active_ads_count: u64,
    pub total_spent: f64,
    pub total_impressions: u64,
    pub ctr: f64,
    #[serde(default)]
    pub chart_data: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotOwnerOverview {
    pub active_bots_count: u64,
    pub total_earned: f64,
    pub total_subscribers: u64,
    #[serde(default)]
    pub chart_data: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotDetailedStats {
    pub views_generated: u64,
    pub earnings: f64,
    pub active_campaigns: u64,
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// First present key wins; numbers and numeric strings count, else 0.
fn first_number(obj: &Value, keys: &[&str]) -> f64 {
    let value = keys
        .iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null());

    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()).unwrap_or(0.0),
        _ => 0.0,
    }
}

fn chart_label(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return ts.format("%d.%m").to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format("%d.%m").to_string();
    }
    raw.to_string()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dashboard analytics.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::analytics::{
    overview_rows, AdvertiserOverview, BotDetailedStats, BotOwnerOverview,
};
use crate::models::{AdminAnalytics, AdminStats, ChartPoint};

#[derive(Clone)]
pub struct AnalyticsService {
    api: ApiClient,
}

impl AnalyticsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Dashboard totals, built from the ads overview and pricing stats
    /// fetched concurrently.
    pub async fn admin_stats(&self) -> Result<AdminStats, ApiError> {
        let (overview, pricing) = tokio::try_join!(
            self.api
                .send_json::<serde_json::Value>(ApiRequest::get("/ads/stats/overview")),
            self.api
                .send_json::<serde_json::Value>(ApiRequest::get("/admin/pricing/stats")),
        )?;

        Ok(AdminStats::aggregate(&overview_rows(&overview), &pricing))
    }

    /// Chart series for the analytics page.
    pub async fn admin_chart(&self) -> Result<AdminAnalytics, ApiError> {
        let overview: serde_json::Value = self
            .api
            .send_json(ApiRequest::get("/ads/stats/overview"))
            .await?;

        Ok(AdminAnalytics {
            categories: Vec::new(),
            chart_data: overview_rows(&overview)
                .iter()
                .map(ChartPoint::from_row)
                .collect(),
        })
    }

    pub async fn advertiser_overview(&self) -> Result<AdvertiserOverview, ApiError> {
        self.api.get("/analytics/advertiser/overview").await
    }

    pub async fn owner_overview(&self) -> Result<BotOwnerOverview, ApiError> {
        self.api.get("/analytics/owner/overview").await
    }

    /// Per-bot breakdown for a period such as `7d` or `30d`.
    pub async fn bot_stats(&self, bot_id: &str, period: &str) -> Result<BotDetailedStats, ApiError> {
        self.api
            .send_unwrapped(
                ApiRequest::get(format!("/analytics/owner/bot/{}", segment(bot_id)))
                    .query("period", period),
            )
            .await
    }
}

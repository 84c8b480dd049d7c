// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ad lookups and exports outside the moderation queue.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::Ad;
use bytes::Bytes;

#[derive(Clone)]
pub struct AdsService {
    api: ApiClient,
}

impl AdsService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn ad(&self, ad_id: &str) -> Result<Ad, ApiError> {
        self.api.get(&format!("/ads/{}", segment(ad_id))).await
    }

    /// Impression log export (binary; CSV on current backends).
    pub async fn export_impressions(&self, ad_id: &str) -> Result<Bytes, ApiError> {
        self.api
            .get_bytes(ApiRequest::get(format!("/ads/{}/export", segment(ad_id))))
            .await
    }

    /// Raw overview body for the last `days` days.
    pub async fn stats_overview(&self, days: u32) -> Result<serde_json::Value, ApiError> {
        self.api
            .send_json(ApiRequest::get("/ads/stats/overview").query("days", days))
            .await
    }
}

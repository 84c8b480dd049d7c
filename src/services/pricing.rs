// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Pricing tiers and platform fee.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{PlatformFee, PricingTier, PricingTierDraft};
use serde::Serialize;

#[derive(Serialize)]
struct BulkTiers<'a> {
    tiers: &'a [PricingTierDraft],
}

#[derive(Clone)]
pub struct PricingService {
    api: ApiClient,
}

impl PricingService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn tiers(&self) -> Result<Vec<PricingTier>, ApiError> {
        self.api.get("/admin/pricing/tiers").await
    }

    pub async fn active_tiers(&self) -> Result<Vec<PricingTier>, ApiError> {
        self.api.get("/admin/pricing/tiers/active").await
    }

    pub async fn create_tier(&self, draft: &PricingTierDraft) -> Result<PricingTier, ApiError> {
        self.api.post("/admin/pricing/tiers", draft).await
    }

    pub async fn update_tier(
        &self,
        tier_id: &str,
        draft: &PricingTierDraft,
    ) -> Result<PricingTier, ApiError> {
        self.api
            .put(&format!("/admin/pricing/tiers/{}", segment(tier_id)), draft)
            .await
    }

    pub async fn delete_tier(&self, tier_id: &str) -> Result<(), ApiError> {
        self.api
            .delete(&format!("/admin/pricing/tiers/{}", segment(tier_id)))
            .await
    }

    pub async fn bulk_create_tiers(&self, tiers: &[PricingTierDraft]) -> Result<(), ApiError> {
        self.api
            .send_unit(ApiRequest::post("/admin/pricing/tiers/bulk").json(&BulkTiers { tiers })?)
            .await
    }

    pub async fn platform_fee(&self) -> Result<PlatformFee, ApiError> {
        self.api.get("/admin/pricing/platform-fee").await
    }

    pub async fn set_platform_fee(&self, fee_percentage: f64) -> Result<(), ApiError> {
        if !(0.0..=100.0).contains(&fee_percentage) {
            return Err(ApiError::InvalidRequest(format!(
                "fee percentage out of range: {}",
                fee_percentage
            )));
        }

        tracing::info!(fee_percentage, "Updating platform fee");
        self.api
            .send_unit(
                ApiRequest::put("/admin/pricing/platform-fee").json(&PlatformFee { fee_percentage })?,
            )
            .await
    }

    /// Raw pricing statistics; the shape varies between backend versions.
    pub async fn stats(&self) -> Result<serde_json::Value, ApiError> {
        self.api
            .send_json(ApiRequest::get("/admin/pricing/stats"))
            .await
    }

    pub async fn calculate_preview(
        &self,
        params: &serde_json::Value,
    ) -> Result<serde_json::Value, ApiError> {
        self.api.post("/admin/pricing/calculate", params).await
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ad and bot moderation queues.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::ad::{InstructionBody, ReasonBody};
use crate::models::{Ad, Bot, PageParams, Paginated};

#[derive(Clone)]
pub struct ModerationService {
    api: ApiClient,
}

impl ModerationService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    // ─── Ads ─────────────────────────────────────────────────────────────────

    pub async fn pending_ads(&self, page: &PageParams) -> Result<Paginated<Ad>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/admin/moderation/ads/pending").page(page))
            .await
    }

    /// Every ad known to moderation, optionally filtered by status.
    pub async fn all_ads(
        &self,
        page: &PageParams,
        status: Option<&str>,
    ) -> Result<Paginated<Ad>, ApiError> {
        self.api
            .send_unwrapped(
                ApiRequest::get("/admin/moderation/ads/all")
                    .page(page)
                    .query_opt("status", status),
            )
            .await
    }

    pub async fn ad_details(&self, ad_id: &str) -> Result<Ad, ApiError> {
        self.api
            .get(&format!("/admin/moderation/ads/{}", segment(ad_id)))
            .await
    }

    pub async fn approve_ad(&self, ad_id: &str) -> Result<(), ApiError> {
        tracing::info!(ad_id, "Approving ad");
        self.api
            .send_unit(ApiRequest::post(format!(
                "/admin/moderation/ads/{}/approve",
                segment(ad_id)
            )))
            .await
    }

    pub async fn reject_ad(&self, ad_id: &str, reason: Option<&str>) -> Result<(), ApiError> {
        tracing::info!(ad_id, "Rejecting ad");
        self.api
            .send_unit(
                ApiRequest::post(format!("/admin/moderation/ads/{}/reject", segment(ad_id)))
                    .json(&ReasonBody { reason })?,
            )
            .await
    }

    /// Send the ad back to its owner with edit instructions.
    pub async fn request_ad_edit(&self, ad_id: &str, instruction: &str) -> Result<(), ApiError> {
        self.api
            .send_unit(
                ApiRequest::post(format!(
                    "/admin/moderation/ads/{}/request-edit",
                    segment(ad_id)
                ))
                .json(&InstructionBody { instruction })?,
            )
            .await
    }

    // ─── Bots ────────────────────────────────────────────────────────────────

    pub async fn pending_bots(&self, page: &PageParams) -> Result<Paginated<Bot>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/admin/moderation/bots").page(page))
            .await
    }

    pub async fn all_bots(
        &self,
        page: &PageParams,
        status: Option<&str>,
    ) -> Result<Paginated<Bot>, ApiError> {
        self.api
            .send_unwrapped(
                ApiRequest::get("/admin/moderation/bots/all")
                    .page(page)
                    .query_opt("status", status),
            )
            .await
    }

    pub async fn approve_bot(&self, bot_id: &str) -> Result<(), ApiError> {
        tracing::info!(bot_id, "Approving bot");
        self.api
            .send_unit(ApiRequest::post(format!(
                "/admin/moderation/bots/{}/approve",
                segment(bot_id)
            )))
            .await
    }

    pub async fn reject_bot(&self, bot_id: &str, reason: Option<&str>) -> Result<(), ApiError> {
        tracing::info!(bot_id, "Rejecting bot");
        self.api
            .send_unit(
                ApiRequest::post(format!("/admin/moderation/bots/{}/reject", segment(bot_id)))
                    .json(&ReasonBody { reason })?,
            )
            .await
    }
}

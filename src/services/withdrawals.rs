// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Withdrawal request processing.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::ad::ReasonBody;
use crate::models::{PageParams, Paginated, WalletTransaction};

#[derive(Clone)]
pub struct WithdrawalService {
    api: ApiClient,
}

impl WithdrawalService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn pending(&self, page: &PageParams) -> Result<Paginated<WalletTransaction>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/admin/withdrawals/pending").page(page))
            .await
    }

    pub async fn all(
        &self,
        page: &PageParams,
        status: Option<&str>,
    ) -> Result<Paginated<WalletTransaction>, ApiError> {
        self.api
            .send_unwrapped(
                ApiRequest::get("/admin/withdrawals/all")
                    .page(page)
                    .query_opt("status", status),
            )
            .await
    }

    pub async fn approve(&self, id: &str) -> Result<(), ApiError> {
        tracing::info!(withdrawal_id = id, "Approving withdrawal");
        self.api
            .send_unit(ApiRequest::post(format!(
                "/admin/withdrawals/{}/approve",
                segment(id)
            )))
            .await
    }

    pub async fn reject(&self, id: &str, reason: Option<&str>) -> Result<(), ApiError> {
        tracing::info!(withdrawal_id = id, "Rejecting withdrawal");
        self.api
            .send_unit(
                ApiRequest::post(format!("/admin/withdrawals/{}/reject", segment(id)))
                    .json(&ReasonBody { reason })?,
            )
            .await
    }
}

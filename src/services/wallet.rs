// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wallet of the signed-in account.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{BalanceCheck, LedgerEntry, PageParams, Paginated, WalletBalance, WalletTransaction};

#[derive(Clone)]
pub struct WalletService {
    api: ApiClient,
}

impl WalletService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn wallet(&self) -> Result<WalletBalance, ApiError> {
        self.api.get("/wallet").await
    }

    pub async fn balance_check(&self) -> Result<BalanceCheck, ApiError> {
        self.api.get("/wallet/balance-check").await
    }

    pub async fn transactions(
        &self,
        page: &PageParams,
    ) -> Result<Paginated<WalletTransaction>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/wallet/transactions").page(page))
            .await
    }

    pub async fn ledger(&self, page: &PageParams) -> Result<Paginated<LedgerEntry>, ApiError> {
        self.api
            .send_unwrapped(ApiRequest::get("/wallet/ledger").page(page))
            .await
    }
}

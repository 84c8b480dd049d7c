// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Support inbox.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{ContactMessages, PageParams};

#[derive(Clone)]
pub struct ContactService {
    api: ApiClient,
}

impl ContactService {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    pub async fn messages(
        &self,
        status: Option<&str>,
        page: &PageParams,
    ) -> Result<ContactMessages, ApiError> {
        let body: serde_json::Value = self
            .api
            .send_json(
                ApiRequest::get("/contact/messages")
                    .query_opt("status", status)
                    .page(page),
            )
            .await?;

        ContactMessages::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Plain HTTP transport.
//!
//! A [`Transport`] sends one [`ApiRequest`] and returns whatever the server
//! answered. Non-2xx statuses are not errors at this layer; only a missing
//! response (connect failure, timeout, broken body) is.

use super::request::{ApiRequest, FormPart, RawResponse, RequestBody};
use crate::config::Config;
use crate::error::ApiError;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use std::time::{Duration, Instant};

/// Something that can carry an [`ApiRequest`] to the backend.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError>;
}

/// reqwest-backed transport rooted at the configured base URL.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(&config.api_url, config.http_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join a resource path onto the base URL.
    pub fn url_for(&self, path: &str) -> Result<String, ApiError> {
        if !path.starts_with('/') {
            return Err(ApiError::InvalidRequest(format!(
                "path must start with '/': {}",
                path
            )));
        }
        Ok(format!("{}{}", self.base_url, path))
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<RawResponse, ApiError> {
        let url = self.url_for(request.path())?;

        let mut builder = self
            .http
            .request(request.method().clone(), &url)
            .headers(request.headers().clone());

        if !request.query_pairs().is_empty() {
            builder = builder.query(request.query_pairs());
        }

        builder = match request.body() {
            None => builder,
            Some(RequestBody::Json(value)) => builder.json(value),
            Some(RequestBody::Multipart(parts)) => builder.multipart(build_form(parts)?),
        };

        let start = Instant::now();
        let response = builder.send().await.map_err(|e| {
            tracing::warn!(
                method = %request.method(),
                path = request.path(),
                error = %e,
                "Backend request failed without a response"
            );
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response body: {}", e)))?;

        tracing::debug!(
            method = %request.method(),
            path = request.path(),
            status = status.as_u16(),
            bytes = body.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        Ok(RawResponse::new(status, headers, body))
    }
}

fn build_form(parts: &[FormPart]) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in parts {
        let mut field = Part::bytes(part.data.to_vec());
        if let Some(file_name) = &part.file_name {
            field = field.file_name(file_name.clone());
        }
        if let Some(content_type) = &part.content_type {
            field = field.mime_str(content_type).map_err(|e| {
                ApiError::InvalidRequest(format!("bad content type {}: {}", content_type, e))
            })?;
        }
        form = form.part(part.name.clone(), field);
    }
    Ok(form)
}

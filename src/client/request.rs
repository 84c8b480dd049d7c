// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Outbound request descriptor and raw response.

use crate::error::ApiError;
use crate::models::PageParams;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// How the caller wants the response body handed back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    #[default]
    Json,
    Binary,
}

/// One field of a multipart upload.
#[derive(Debug, Clone)]
pub struct FormPart {
    pub name: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

impl FormPart {
    /// A file field, e.g. the `file` part of an image upload.
    pub fn file(
        name: impl Into<String>,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            data: data.into(),
        }
    }
}

/// Request body. Kept as data (not a live reqwest body) so a request can be
/// replayed after a session refresh.
#[derive(Debug, Clone)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<FormPart>),
}

/// Method, path, query, headers and body of a call to the backend.
///
/// `path` is relative to the configured base URL. The `retried` marker is
/// set by the auth layer when the request is replayed after a refresh and is
/// never reset.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    body: Option<RequestBody>,
    response_kind: ResponseKind,
    retried: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            headers: HeaderMap::new(),
            body: None,
            response_kind: ResponseKind::Json,
            retried: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Add a query parameter only when a value is present.
    pub fn query_opt<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    /// Add `limit`/`offset` pagination parameters.
    pub fn page(self, page: &PageParams) -> Self {
        self.query_opt("limit", page.limit)
            .query_opt("offset", page.offset)
    }

    /// Attach a JSON body.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("body not serializable: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn multipart(mut self, parts: Vec<FormPart>) -> Self {
        self.body = Some(RequestBody::Multipart(parts));
        self
    }

    /// Expect a binary body (file export) instead of JSON.
    pub fn binary(mut self) -> Self {
        self.response_kind = ResponseKind::Binary;
        self
    }

    /// Set `Authorization: Bearer <token>`, replacing any previous value.
    pub fn set_bearer(&mut self, token: &str) -> Result<(), ApiError> {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| ApiError::InvalidRequest("access token is not a valid header".into()))?;
        value.set_sensitive(true);
        self.headers.insert(AUTHORIZATION, value);
        Ok(())
    }

    pub fn authorization(&self) -> Option<&str> {
        self.headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
    }

    pub fn mark_retried(&mut self) {
        self.retried = true;
    }

    pub fn is_retried(&self) -> bool {
        self.retried
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> Option<&RequestBody> {
        self.body.as_ref()
    }

    pub fn response_kind(&self) -> ResponseKind {
        self.response_kind
    }
}

/// Status, headers and body of a response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
    retried: bool,
}

impl RawResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
            retried: false,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// True when this is the response to a replayed request.
    pub fn was_retried(&self) -> bool {
        self.retried
    }

    pub(crate) fn mark_retried(mut self) -> Self {
        self.retried = true;
        self
    }

    /// Turn a non-2xx response into the matching [`ApiError`].
    pub fn into_result(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            return Ok(self);
        }

        let body = String::from_utf8_lossy(&self.body).into_owned();
        if self.status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized {
                retried: self.retried,
                body,
            });
        }

        Err(ApiError::Upstream {
            status: self.status.as_u16(),
            body,
        })
    }

    /// Parse the body as JSON. An empty body parses as `null`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        decode_json(&self.body)
    }

    pub fn into_body(self, kind: ResponseKind) -> Result<ResponseBody, ApiError> {
        match kind {
            ResponseKind::Binary => Ok(ResponseBody::Binary(self.body)),
            ResponseKind::Json => decode_json(&self.body).map(ResponseBody::Json),
        }
    }
}

/// Parsed response body.
#[derive(Debug, Clone)]
pub enum ResponseBody {
    Json(serde_json::Value),
    Binary(Bytes),
}

impl ResponseBody {
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ResponseBody::Json(value) => {
                serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
            }
            ResponseBody::Binary(bytes) => decode_json(&bytes),
        }
    }

    pub fn into_bytes(self) -> Bytes {
        match self {
            ResponseBody::Binary(bytes) => bytes,
            ResponseBody::Json(value) => Bytes::from(value.to_string()),
        }
    }
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return serde_json::from_value(serde_json::Value::Null)
            .map_err(|e| ApiError::Decode(format!("empty body: {}", e)));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_replaces_previous_value() {
        let mut request = ApiRequest::get("/admin/users");
        assert_eq!(request.authorization(), None);

        request.set_bearer("A1").unwrap();
        request.set_bearer("A2").unwrap();
        assert_eq!(request.authorization(), Some("Bearer A2"));
        assert_eq!(request.headers().get_all(AUTHORIZATION).iter().count(), 1);
    }

    #[test]
    fn test_page_params_skip_missing_values() {
        let request = ApiRequest::get("/admin/users").page(&PageParams {
            limit: Some(20),
            offset: None,
        });
        assert_eq!(
            request.query_pairs(),
            &[("limit".to_string(), "20".to_string())]
        );
    }

    #[test]
    fn test_into_result_classifies_status() {
        let unauthorized = RawResponse::new(
            StatusCode::UNAUTHORIZED,
            HeaderMap::new(),
            Bytes::from_static(b"{}"),
        )
        .mark_retried();
        assert!(matches!(
            unauthorized.into_result(),
            Err(ApiError::Unauthorized { retried: true, .. })
        ));

        let server = RawResponse::new(
            StatusCode::BAD_GATEWAY,
            HeaderMap::new(),
            Bytes::from_static(b"upstream down"),
        );
        match server.into_result() {
            Err(ApiError::Upstream { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_body_decodes_as_null() {
        let response = RawResponse::new(StatusCode::NO_CONTENT, HeaderMap::new(), Bytes::new());
        let value: Option<serde_json::Value> = response.json().unwrap();
        assert!(value.is_none());
        let _: () = response.json().unwrap();
    }
}

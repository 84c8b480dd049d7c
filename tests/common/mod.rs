// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Fake admin backend for integration tests.
//!
//! An axum router on an ephemeral port that issues access tokens `A1`,
//! `A2`, ... and refresh tokens `R1`, `R2`, ..., rotating both on every
//! successful `POST /auth/refresh`. Every request is recorded.

#![allow(dead_code)]

use akhmads_admin::client::ApiClient;
use akhmads_admin::config::Config;
use akhmads_admin::session::{Session, TokenPair};
use axum::{
    body::Bytes,
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// One request as seen by the fake backend.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
}

struct Tokens {
    generation: usize,
    access: Option<String>,
    refresh: String,
}

pub struct MockState {
    tokens: Mutex<Tokens>,
    refresh_calls: AtomicUsize,
    refresh_delay: Mutex<Duration>,
    refresh_failure: Mutex<Option<StatusCode>>,
    requests: Mutex<Vec<Recorded>>,
    bodies: Mutex<Vec<(String, Bytes)>>,
}

impl MockState {
    fn new() -> Self {
        Self {
            tokens: Mutex::new(Tokens {
                generation: 1,
                access: Some("A1".to_string()),
                refresh: "R1".to_string(),
            }),
            refresh_calls: AtomicUsize::new(0),
            refresh_delay: Mutex::new(Duration::ZERO),
            refresh_failure: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
            bodies: Mutex::new(Vec::new()),
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        match &self.tokens.lock().access {
            Some(valid) => presented == Some(format!("Bearer {}", valid).as_str()),
            None => false,
        }
    }

    fn keep_body(&self, path: String, body: Bytes) {
        self.bodies.lock().push((path, body));
    }
}

/// Handle to a running fake backend.
pub struct MockBackend {
    pub base_url: String,
    pub state: Arc<MockState>,
    server: tokio::task::JoinHandle<()>,
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

impl MockBackend {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::new());
        let app = router(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            server,
        }
    }

    /// Client over a fresh in-memory session.
    pub fn client(&self) -> (ApiClient, Session) {
        let session = Session::in_memory();
        (self.client_for(session.clone()), session)
    }

    pub fn client_for(&self, session: Session) -> ApiClient {
        ApiClient::new(&Config::for_base_url(&self.base_url), session)
            .expect("Failed to build client")
    }

    /// Invalidate the current access token; the refresh token stays valid.
    pub fn expire_access_token(&self) {
        self.state.tokens.lock().access = None;
    }

    /// Make the backend forget the current refresh token.
    pub fn revoke_refresh_token(&self) {
        self.state.tokens.lock().refresh = "revoked".to_string();
    }

    pub fn set_refresh_delay(&self, delay: Duration) {
        *self.state.refresh_delay.lock() = delay;
    }

    pub fn fail_refresh_with(&self, status: StatusCode) {
        *self.state.refresh_failure.lock() = Some(status);
    }

    pub fn refresh_calls(&self) -> usize {
        self.state.refresh_calls.load(Ordering::SeqCst)
    }

    /// Requests received for `path`, in arrival order.
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.state
            .requests
            .lock()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }

    /// Body of the last request received for `path`.
    pub fn last_body(&self, path: &str) -> Option<Bytes> {
        self.state
            .bodies
            .lock()
            .iter()
            .rev()
            .find(|(p, _)| p == path)
            .map(|(_, b)| b.clone())
    }
}

/// The credential pair the backend starts out issuing.
pub fn initial_tokens() -> TokenPair {
    TokenPair {
        access_token: "A1".to_string(),
        refresh_token: "R1".to_string(),
    }
}

/// Counts `auth:unauthorized` broadcasts on a session.
pub fn count_unauthorized(session: &Session) -> Arc<AtomicUsize> {
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    session.on_unauthorized(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    fired
}

fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/auth/refresh", post(refresh))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/role", put(accept_json))
        .route("/admin/moderation/ads/pending", get(pending_ads))
        .route("/admin/moderation/ads/{id}/approve", post(accept_empty))
        .route("/admin/moderation/ads/{id}/reject", post(accept_json))
        .route("/admin/withdrawals/{id}/reject", post(accept_json))
        .route("/admin/pricing/platform-fee", put(accept_json))
        .route("/admin/pricing/stats", get(pricing_stats))
        .route("/ads/stats/overview", get(ads_overview))
        .route("/ads/{id}/export", get(export_ad))
        .route("/wallet", get(wallet))
        .route("/contact/messages", get(contact_messages))
        .route("/upload/image", post(upload_image))
        .route("/always-401", get(always_unauthorized))
        .route("/broken", get(broken))
        .layer(middleware::from_fn_with_state(state.clone(), record))
        .with_state(state)
}

async fn record(State(state): State<Arc<MockState>>, req: Request, next: Next) -> Response {
    state.requests.lock().push(Recorded {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        query: req.uri().query().map(str::to_string),
        authorization: req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
    });
    next.run(req).await
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "message": "Unauthorized", "statusCode": 401 })),
    )
        .into_response()
}

async fn refresh(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.refresh_calls.fetch_add(1, Ordering::SeqCst);

    let delay = *state.refresh_delay.lock();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }

    if let Some(status) = *state.refresh_failure.lock() {
        return (status, Json(json!({ "message": "refresh failed" }))).into_response();
    }

    let presented = body
        .get("refreshToken")
        .and_then(Value::as_str)
        .unwrap_or_default();

    let mut tokens = state.tokens.lock();
    if presented != tokens.refresh {
        return unauthorized();
    }

    tokens.generation += 1;
    let access = format!("A{}", tokens.generation);
    let refresh = format!("R{}", tokens.generation);
    tokens.access = Some(access.clone());
    tokens.refresh = refresh.clone();

    Json(json!({
        "data": { "tokens": { "accessToken": access, "refreshToken": refresh } }
    }))
    .into_response()
}

fn user(id: &str, role: &str) -> Value {
    named_user(id, role, "dilnoza", "100200300")
}

fn named_user(id: &str, role: &str, username: &str, telegram_id: &str) -> Value {
    json!({
        "id": id,
        "telegramId": telegram_id,
        "role": role,
        "firstName": "Dilnoza",
        "username": username,
        "createdAt": "2026-01-10T08:00:00Z",
        "updatedAt": "2026-01-10T08:00:00Z"
    })
}

async fn me(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "data": { "user": user("u-admin", "ADMIN") } })).into_response()
}

async fn logout() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

async fn list_users(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    let limit: u32 = query.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let offset: u32 = query.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    Json(json!({
        "data": [
            named_user("u1", "ADVERTISER", "dilnoza", "100200301"),
            named_user("u2", "BOT_OWNER", "botmaker", "100200302"),
            named_user("u3", "SUPPORT", "Jasur_Help", "100200303"),
            named_user("u4", "ADMIN", "kamola", "100200304"),
        ],
        "total": 4,
        "limit": limit,
        "offset": offset
    }))
    .into_response()
}

async fn pending_ads(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": [{
            "id": "ad-1",
            "status": "PENDING_REVIEW",
            "title": "Spring sale",
            "text": "Everything 20% off",
            "contentType": "TEXT",
            "cpmBid": 1.5,
            "targetImpressions": 10000,
            "createdAt": "2026-03-01T12:00:00Z",
            "updatedAt": "2026-03-01T12:00:00Z"
        }],
        "total": 1,
        "limit": 20,
        "offset": 0
    }))
    .into_response()
}

async fn accept_empty(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({ "success": true })).into_response()
}

async fn accept_json(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    uri: Uri,
    body: Bytes,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    state.keep_body(uri.path().to_string(), body);
    StatusCode::NO_CONTENT.into_response()
}

async fn pricing_stats(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": { "revenue": "1250.50", "platformEarnings": 187.5, "feePercentage": 15 }
    }))
    .into_response()
}

async fn ads_overview(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": { "stats": [
            { "date": "2026-05-01", "activeAds": 3, "impressions": 1000, "clicks": 25, "spent": 4.5 },
            { "date": "2026-05-02", "activeAds": 5, "impressions": 2000, "clicks": 45, "spent": 10.0 }
        ] }
    }))
    .into_response()
}

async fn export_ad(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    (
        [(header::CONTENT_TYPE, "text/csv")],
        format!("adId,date,impressions\n{},2026-05-01,1000\n", id),
    )
        .into_response()
}

async fn wallet(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": { "available": 120.0, "pending": 5.0, "locked": 0.0, "currency": "USD" }
    }))
    .into_response()
}

async fn contact_messages(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    Json(json!({
        "data": { "messages": [{
            "id": "m1",
            "name": "Aziz",
            "email": "aziz@example.com",
            "subject": "Payout",
            "message": "Where is my payout?",
            "status": "new",
            "createdAt": "2026-05-01T10:00:00Z"
        }], "total": 1 }
    }))
    .into_response()
}

async fn upload_image(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.authorized(&headers) {
        return unauthorized();
    }
    state.keep_body("/upload/image".to_string(), body);
    Json(json!({ "data": { "url": "https://cdn.akhmads.net/media/banner.png" } })).into_response()
}

async fn always_unauthorized() -> Response {
    unauthorized()
}

async fn broken() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": "boom" })),
    )
        .into_response()
}

use crate::db::PersonStore;
use crate::server::API_PREFIX;
use crate::server::routes::persons;

use axum::{
    Json, Router,
    extract::Request,
    http::{HeaderName, HeaderValue, Method, StatusCode, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use base64::Engine as _;
use persons_schema::ErrorBody;
use rand::RngCore;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// Shared handler state. The store is injected here; nothing is read from globals.
#[derive(Clone)]
pub struct PersonsState {
    pub store: Arc<dyn PersonStore>,
}

impl PersonsState {
    pub fn new(store: Arc<dyn PersonStore>) -> Self {
        Self { store }
    }
}

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

async fn not_found_handler() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("not found")))
}

#[derive(Clone, Copy)]
struct AccessRecord<'a> {
    status: StatusCode,
    request_id: &'a str,
    method: &'a Method,
    protocol: &'static str,
    path: &'a str,
    latency_ms: u64,
    user_agent: &'a str,
}

impl AccessRecord<'_> {
    fn emit(&self) {
        let Self {
            status,
            request_id,
            method,
            protocol,
            path,
            latency_ms,
            user_agent,
        } = *self;
        let status = status.as_u16();

        if self.status.is_server_error() {
            error!(status, request_id, %method, protocol, path, latency_ms, user_agent, "access");
        } else if self.status.is_client_error() {
            warn!(status, request_id, %method, protocol, path, latency_ms, user_agent, "access");
        } else {
            info!(status, request_id, %method, protocol, path, latency_ms, user_agent, "access");
        }
    }
}

async fn access_log(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let protocol = format_http_version(req.version());

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map(str::to_string)
        .unwrap_or_else(generate_request_id);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Reflect `x-request-id` even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    AccessRecord {
        status: resp.status(),
        request_id: &request_id,
        method: &method,
        protocol,
        path: &path,
        latency_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
        user_agent: &user_agent,
    }
    .emit();

    resp
}

pub fn persons_router(state: PersonsState) -> Router {
    Router::new()
        .nest(API_PREFIX, persons::router())
        .fallback(not_found_handler)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(access_log))
}

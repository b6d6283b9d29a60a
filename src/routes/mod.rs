//! HTTP Routes
//!
//! The browser-facing surface: auth handshake, aggregation, and the
//! conversation step endpoint, assembled into one router. The session
//! credential rides in a plain `sessionKey` cookie handled here.

pub mod auth;
pub mod roast;

use axum::http::{header, HeaderMap};
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "sessionKey";

/// One week, matching the upstream session's practical lifetime
const SESSION_MAX_AGE_SECONDS: u32 = 604_800;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/auth-url", get(auth::auth_url))
        .route("/api/callback", get(auth::callback))
        .route("/api/roast-data", get(roast::roast_data))
        .route("/api/roast-step", post(roast::roast_step))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

/// Set-Cookie value for the session credential. `Secure` is dropped for
/// loopback hosts so local development over plain HTTP keeps the cookie.
pub fn session_cookie(key: &str, host: &str) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Max-Age={}; HttpOnly",
        SESSION_COOKIE, key, SESSION_MAX_AGE_SECONDS
    );
    if !is_loopback_host(host) {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Pull the session credential out of the Cookie header, if present
pub fn session_key(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}

fn is_loopback_host(host: &str) -> bool {
    host.starts_with("localhost") || host.starts_with("127.0.0.1")
}

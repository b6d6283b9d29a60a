//! Auth Routes
//!
//! Last.fm's OAuth-style handshake: hand the browser an authorization
//! URL, then exchange the token it comes back with for a session key and
//! park that in the cookie. Failures land back on the front page with an
//! error query the UI can surface.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::response::{IntoResponse, Json, Redirect, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::routes::session_cookie;
use crate::services::lastfm::LastfmError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CallbackQuery {
    token: Option<String>,
}

/// GET /api/auth-url
pub async fn auth_url(State(state): State<AppState>) -> Json<Value> {
    let url = state.lastfm.auth_url(&state.config.callback_url());
    Json(json!({"authUrl": url}))
}

/// GET /api/callback?token=...
///
/// Where Last.fm sends the browser after the user grants access.
pub async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Response {
    let token = match query.token.filter(|t| !t.is_empty()) {
        Some(token) => token,
        None => {
            tracing::warn!("Auth callback hit without a token");
            return Redirect::to(&error_redirect("auth_failed")).into_response();
        }
    };

    match state.lastfm.get_session(&token).await {
        Ok(session) => {
            tracing::info!(user = %session.name, "Authenticated Last.fm session");
            let host = headers
                .get(header::HOST)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            let cookie = session_cookie(&session.key, host);
            (
                [(header::SET_COOKIE, cookie)],
                Redirect::to(&success_redirect(&session.name)),
            )
                .into_response()
        }
        Err(LastfmError::Upstream { message, .. }) => {
            tracing::warn!("Session exchange rejected upstream: {}", message);
            Redirect::to(&error_redirect(&message)).into_response()
        }
        Err(e) => {
            tracing::error!("Session exchange failed: {}", e);
            Redirect::to(&error_redirect("session_fetch_failed")).into_response()
        }
    }
}

fn error_redirect(message: &str) -> String {
    format!("/?error={}", urlencoding::encode(message))
}

fn success_redirect(user: &str) -> String {
    format!("/success?user={}", urlencoding::encode(user))
}

//! Roast Routes
//!
//! The aggregation endpoint that builds the composite listening record,
//! and the step endpoint that advances the conversation one turn at a
//! time. Both trust the caller to hold all conversation state.

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::routes::session_key;
use crate::services::lastfm::fetch_roast_data;
use crate::services::roast::{advance, StepRequest, StepResponse};
use crate::state::AppState;
use crate::utils::error::{AppError, AppResult};

#[derive(Deserialize)]
pub struct RoastDataQuery {
    user: Option<String>,
}

/// GET /api/roast-data?user=NAME
///
/// Runs the full aggregation round against Last.fm. Requires both a
/// username and the session cookie set by the auth callback.
pub async fn roast_data(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<RoastDataQuery>,
) -> AppResult<Json<Value>> {
    let user = query
        .user
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::unauthorized("Missing user."))?;
    if session_key(&headers).is_none() {
        return Err(AppError::unauthorized("Missing session key."));
    }

    let data = fetch_roast_data(&state.lastfm, &user).await?;
    Ok(Json(data))
}

/// POST /api/roast-step
pub async fn roast_step(
    State(state): State<AppState>,
    Json(request): Json<StepRequest>,
) -> Json<StepResponse> {
    Json(advance(request, state.llm.as_ref()).await)
}

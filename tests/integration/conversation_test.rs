//! Conversation Flow Integration Tests
//!
//! Drives the router the way the browser does: request bodies are raw
//! wire-format JSON, conversation state is round-tripped by the caller,
//! and the completion provider is unconfigured so every reply comes from
//! the deterministic fallbacks. Nothing here touches the network.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use roastfm::services::roast::{questions, QuestionKind, RoastData, RoastStep, StepResponse};
use roastfm::{router, AppConfig, AppState};

fn test_state() -> AppState {
    AppState::new(AppConfig {
        lastfm_api_key: "test-key".to_string(),
        lastfm_shared_secret: "test-secret".to_string(),
        openai_api_key: None,
        openai_base_url: "https://api.openai.com/v1".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        port: 0,
        public_base_url: "http://localhost:3000".to_string(),
    })
}

fn full_record() -> Value {
    let albums: Vec<Value> = (1..=4)
        .map(|i| json!({"name": format!("Album {}", i), "artist": {"name": "Band"}}))
        .collect();
    json!({
        "userInfo": {"name": "listener", "playcount": "12345"},
        "topAlbums": {"album": albums},
        "topTracks": {"track": [{"name": "Song", "artist": {"name": "Band"}}]},
        "topArtists": {"artist": [{"name": "Band"}]},
        "recentTracks": {"track": [{"name": "Now", "artist": {"#text": "Band"}}]},
        "lovedTracks": {"track": [{"name": "Dear"}]}
    })
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse body")
}

/// POST one conversation turn through the router
async fn post_step(state: &AppState, body: Value) -> Value {
    let request = Request::builder()
        .method("POST")
        .uri("/api/roast-step")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");
    let response = router(state.clone()).oneshot(request).await.expect("route");
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}

// ============================================================================
// HTTP surface
// ============================================================================

#[tokio::test]
async fn test_health_reports_ok() {
    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .expect("build request");
    let response = router(test_state()).oneshot(request).await.expect("route");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_auth_url_carries_key_and_callback() {
    let request = Request::builder()
        .uri("/api/auth-url")
        .body(Body::empty())
        .expect("build request");
    let response = router(test_state()).oneshot(request).await.expect("route");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let url = body["authUrl"].as_str().expect("authUrl");
    assert!(url.starts_with("https://www.last.fm/api/auth/"));
    assert!(url.contains("api_key=test-key"));
    assert!(url.contains("cb=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fcallback"));
}

#[tokio::test]
async fn test_roast_data_requires_user() {
    let request = Request::builder()
        .uri("/api/roast-data")
        .body(Body::empty())
        .expect("build request");
    let response = router(test_state()).oneshot(request).await.expect("route");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized: Missing user.");
}

#[tokio::test]
async fn test_roast_data_requires_session_cookie() {
    let request = Request::builder()
        .uri("/api/roast-data?user=listener")
        .body(Body::empty())
        .expect("build request");
    let response = router(test_state()).oneshot(request).await.expect("route");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized: Missing session key.");
}

#[tokio::test]
async fn test_callback_without_token_redirects_to_error() {
    let request = Request::builder()
        .uri("/api/callback")
        .body(Body::empty())
        .expect("build request");
    let response = router(test_state()).oneshot(request).await.expect("route");

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .expect("location header");
    assert_eq!(location, "/?error=auth_failed");
}

// ============================================================================
// Conversation loop
// ============================================================================

#[tokio::test]
async fn test_step_response_uses_wire_field_names() {
    let state = test_state();
    let body = post_step(
        &state,
        json!({"step": "ready", "user": "listener", "roastData": full_record()}),
    )
    .await;

    assert_eq!(body["nextStep"], "typing_intro");
    assert!(body["botMessage"].as_str().expect("botMessage").contains("listener"));
    assert!(body["choices"].is_array());
    assert!(body["questionQueue"].is_array());
}

/// The whole conversation, wire to wire: every viable question is asked
/// exactly once, the queue only ever holds viable kinds, and the terminal
/// state is reached within the bounded number of turns.
#[tokio::test]
async fn test_full_conversation_reaches_complete() {
    let state = test_state();
    let record = full_record();
    let viewing = record.clone();
    let view = RoastData::new(&viewing);

    let mut history: Vec<Value> = Vec::new();
    let mut asked: Vec<QuestionKind> = Vec::new();
    let mut step = "ready".to_string();
    let mut choice = Value::Null;
    let mut queue = json!([]);
    let mut turns = 0;

    loop {
        turns += 1;
        assert!(turns <= 10, "conversation did not terminate");

        let body = post_step(
            &state,
            json!({
                "step": step,
                "choice": choice,
                "user": "listener",
                "roastData": record,
                "history": history,
                "questionQueue": queue,
            }),
        )
        .await;
        let response: StepResponse =
            serde_json::from_value(body.clone()).expect("wire response parses");

        for kind in &response.question_queue {
            assert!(
                questions::is_viable(*kind, &view),
                "{:?} queued but not viable",
                kind
            );
        }
        if let Some(kind) = QuestionKind::for_step(response.next_step) {
            assert!(!asked.contains(&kind), "{:?} asked twice", kind);
            asked.push(kind);
        }
        if response.next_step == RoastStep::Complete {
            assert!(response.choices.is_empty());
            break;
        }

        let picked = response
            .choices
            .first()
            .map(|c| c.value.clone())
            .unwrap_or_default();
        history.push(json!({
            "user_choice": picked,
            "bot_message": response.bot_message,
        }));
        step = body["nextStep"].as_str().expect("nextStep").to_string();
        choice = json!(picked);
        queue = body["questionQueue"].clone();
    }

    assert_eq!(asked.len(), QuestionKind::ALL.len(), "every question should run once");
}

#[tokio::test]
async fn test_three_albums_never_queues_album_question() {
    let state = test_state();
    let mut record = full_record();
    let albums: Vec<Value> = (1..=3)
        .map(|i| json!({"name": format!("Album {}", i), "artist": {"name": "Band"}}))
        .collect();
    record["topAlbums"]["album"] = json!(albums);

    let body = post_step(
        &state,
        json!({"step": "typing_intro", "user": "listener", "roastData": record}),
    )
    .await;
    let response: StepResponse = serde_json::from_value(body).expect("wire response parses");

    assert_ne!(response.next_step, RoastStep::AskAlbums);
    assert!(!response.question_queue.contains(&QuestionKind::Albums));
    assert_eq!(
        response.question_queue.len(),
        QuestionKind::ALL.len() - 2,
        "five viable kinds minus the one being asked"
    );
}

#[tokio::test]
async fn test_intro_without_data_closes_conversation() {
    let state = test_state();
    let body = post_step(&state, json!({"step": "typing_intro"})).await;
    let response: StepResponse = serde_json::from_value(body).expect("wire response parses");

    assert_eq!(response.next_step, RoastStep::Final);
    assert!(response.question_queue.is_empty());

    let body = post_step(&state, json!({"step": "final"})).await;
    let response: StepResponse = serde_json::from_value(body).expect("wire response parses");
    assert_eq!(response.next_step, RoastStep::Complete);
}

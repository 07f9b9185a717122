//! End-to-end tests of `DebateClient` against a local HTTP server.

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use debate_client::{
    AgentStatus, DebateClient, DebateConfig, DebateRequest, DebateSession, Language, Phase,
};
use serde_json::{json, Value};
use tokio::sync::Mutex;

use common::{frame, full_debate_stream};

#[derive(Clone)]
struct ServerState {
    chunks: Vec<String>,
    status: StatusCode,
    received: Arc<Mutex<Option<Value>>>,
}

async fn stream_debate(State(state): State<ServerState>, Json(body): Json<Value>) -> Response {
    *state.received.lock().await = Some(body);

    if !state.status.is_success() {
        return (state.status, "upstream quota exhausted").into_response();
    }

    let chunks = state
        .chunks
        .into_iter()
        .map(Ok::<_, std::io::Error>);
    Response::builder()
        .header(header::CONTENT_TYPE, "text/event-stream")
        .body(Body::from_stream(futures::stream::iter(chunks)))
        .unwrap()
}

/// Serve `/debate/stream` on an ephemeral port and return its base URL.
async fn spawn_server(state: ServerState) -> String {
    let app = Router::new()
        .route("/debate/stream", post(stream_debate))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

fn server_state(chunks: Vec<String>, status: StatusCode) -> ServerState {
    ServerState {
        chunks,
        status,
        received: Arc::new(Mutex::new(None)),
    }
}

#[tokio::test]
async fn test_streams_full_debate_over_http() {
    let stream = full_debate_stream();
    let (head, tail) = stream.split_at(stream.len() / 2);
    let state = server_state(vec![head.to_string(), tail.to_string()], StatusCode::OK);
    let received = state.received.clone();
    let base_url = spawn_server(state).await;

    let session = DebateSession::new(Arc::new(DebateClient::new(base_url)));
    session
        .start(
            DebateRequest::new("Open a second office")
                .context("Team of 12")
                .model("gemini-2.5-flash")
                .language(Language::Ru),
        )
        .await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Done);
    assert_eq!(snapshot.agent_status.judge, AgentStatus::Done);
    assert!(snapshot.verdict.is_some());

    assert_eq!(
        received.lock().await.clone(),
        Some(json!({
            "decision": "Open a second office",
            "context": "Team of 12",
            "model": "gemini-2.5-flash",
            "language": "ru",
        }))
    );
}

#[tokio::test]
async fn test_non_success_status_is_terminal_error() {
    let state = server_state(vec![], StatusCode::TOO_MANY_REQUESTS);
    let base_url = spawn_server(state).await;

    let session = DebateSession::new(Arc::new(DebateClient::new(base_url)));
    session.start(DebateRequest::new("x")).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Error);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("HTTP 429: upstream quota exhausted")
    );
    assert_eq!(snapshot.agent_status.pro, AgentStatus::Idle);
    assert_eq!(snapshot.agent_status.con, AgentStatus::Idle);
    assert_eq!(snapshot.agent_status.judge, AgentStatus::Idle);
}

#[tokio::test]
async fn test_stream_closed_without_done_event() {
    let body = frame("progress", &json!({"agent": "pro"}));
    let state = server_state(vec![body], StatusCode::OK);
    let base_url = spawn_server(state).await;

    let config = DebateConfig {
        api_url: base_url,
        ..Default::default()
    };
    let session = DebateSession::new(Arc::new(DebateClient::from_config(&config).unwrap()));
    session.start(DebateRequest::new("x")).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Done);
    assert_eq!(snapshot.agent_status.pro, AgentStatus::Thinking);
    assert!(snapshot.error.is_none());
}

#[tokio::test]
async fn test_unreachable_service() {
    // Bind then drop to get a port with no listener
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let session = DebateSession::new(Arc::new(DebateClient::new(format!("http://{}", addr))));
    session.start(DebateRequest::new("x")).await;

    let snapshot = session.snapshot();
    assert_eq!(snapshot.phase, Phase::Error);
    assert!(snapshot.error.unwrap().starts_with("Network error"));
}

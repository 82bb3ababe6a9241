//! Test utilities for feelwrite-core
//!
//! Provides a mock server speaking the OpenAI chat-completions protocol so the
//! real HTTP backend can be exercised without a network connection.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tokio::sync::oneshot;

#[derive(Clone)]
struct MockState {
    /// None makes every completion fail with a 500
    reply: Option<String>,
    requests: Arc<Mutex<Vec<Value>>>,
}

/// Mock chat-completions server for testing and development
pub struct MockCompletionServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start a server that answers every completion with a canned reply
    pub async fn start() -> Self {
        Self::start_with(Some(
            "It sounds like this week asked a lot of you. Be gentle with yourself.".to_string(),
        ))
        .await
    }

    /// Start a server that answers every completion with `reply`
    pub async fn start_with_reply(reply: &str) -> Self {
        Self::start_with(Some(reply.to_string())).await
    }

    /// Start a server whose completions always fail
    pub async fn start_failing() -> Self {
        Self::start_with(None).await
    }

    async fn start_with(reply: Option<String>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            reply,
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Request bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn handle_models() -> Json<Value> {
    Json(json!({
        "object": "list",
        "data": [{ "id": "mock-model", "object": "model" }]
    }))
}

async fn handle_chat(State(state): State<MockState>, Json(body): Json<Value>) -> Response {
    let model = body["model"].as_str().unwrap_or("mock-model").to_string();
    state.requests.lock().unwrap().push(body);

    match state.reply {
        Some(reply) => Json(json!({
            "id": "chatcmpl-mock",
            "object": "chat.completion",
            "model": model,
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": reply },
                "finish_reason": "stop"
            }]
        }))
        .into_response(),
        None => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": { "message": "mock failure" } })),
        )
            .into_response(),
    }
}

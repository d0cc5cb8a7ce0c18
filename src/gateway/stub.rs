//! Throwaway chat-completion server for tests.
//!
//! Binds `127.0.0.1:0`, answers every `POST /v1/chat/completions` with a
//! canned response and records what it received.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::post,
    Router,
};
use serde_json::{json, Value};

struct StubState {
    status: StatusCode,
    content_type: String,
    body: String,
    hits: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_authorization: Mutex<Option<String>>,
}

/// Handle to a running stub provider.
pub(crate) struct StubProvider {
    base_url: String,
    state: Arc<StubState>,
}

impl StubProvider {
    /// Answer with a chat-completion envelope whose content is `output`
    /// serialized as JSON.
    pub(crate) async fn completion(output: Value) -> Self {
        Self::completion_text(&output.to_string()).await
    }

    /// Answer with a chat-completion envelope carrying `text` verbatim.
    pub(crate) async fn completion_text(text: &str) -> Self {
        let envelope = json!({
            "id": "gen-stub",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": text},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
        });
        Self::raw(StatusCode::OK, "application/json", &envelope.to_string()).await
    }

    /// Answer with an arbitrary status, content type and body.
    pub(crate) async fn raw(status: StatusCode, content_type: &str, body: &str) -> Self {
        let state = Arc::new(StubState {
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
            hits: AtomicUsize::new(0),
            last_body: Mutex::new(None),
            last_authorization: Mutex::new(None),
        });

        let app = Router::new()
            .route("/v1/chat/completions", post(handle))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/v1", addr),
            state,
        }
    }

    pub(crate) fn base_url(&self) -> String {
        self.base_url.clone()
    }

    pub(crate) fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn last_body(&self) -> Option<Value> {
        self.state.last_body.lock().unwrap().clone()
    }

    pub(crate) fn last_authorization(&self) -> Option<String> {
        self.state.last_authorization.lock().unwrap().clone()
    }
}

async fn handle(State(state): State<Arc<StubState>>, headers: HeaderMap, body: Bytes) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    *state.last_body.lock().unwrap() = serde_json::from_slice(&body).ok();
    *state.last_authorization.lock().unwrap() = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    Response::builder()
        .status(state.status)
        .header(header::CONTENT_TYPE, state.content_type.as_str())
        .body(Body::from(state.body.clone()))
        .unwrap()
}

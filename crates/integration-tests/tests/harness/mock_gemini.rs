//! Mock Generative Language backend
//!
//! Serves `POST /v1beta/models/{model}:generateContent` with a canned reply,
//! a reply derived from the user turn, or a failure.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

pub const API_KEY: &str = "gemini-test-key";

/// What the mock answers with
#[derive(Clone)]
pub enum Reply {
    /// Fixed model text
    Text(String),
    /// Two messages, `"<user> one"` and `"<user> two"`
    Echo,
    /// HTTP 503
    Unavailable,
}

pub struct MockGemini {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockGeminiState>,
}

struct MockGeminiState {
    reply: Reply,
    request_count: AtomicU32,
}

impl MockGemini {
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let state = Arc::new(MockGeminiState {
            reply,
            request_count: AtomicU32::new(0),
        });

        let app = Router::new()
            .route("/v1beta/models/{*model_action}", routing::post(handle_generate))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Mock model text answering with `text`
    pub async fn replying(text: &str) -> Self {
        Self::start(Reply::Text(text.to_owned())).await.unwrap()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1beta", self.addr)
    }

    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }
}

impl Drop for MockGemini {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Deserialize)]
struct KeyQuery {
    key: Option<String>,
}

async fn handle_generate(
    State(state): State<Arc<MockGeminiState>>,
    Query(query): Query<KeyQuery>,
    Json(body): Json<Value>,
) -> Response {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    if query.key.as_deref() != Some(API_KEY) {
        return (StatusCode::FORBIDDEN, "API key not valid").into_response();
    }

    let user = body["contents"][0]["parts"][0]["text"].as_str().unwrap_or_default();

    let text = match &state.reply {
        Reply::Text(text) => text.clone(),
        Reply::Echo => json!({
            "messages": [
                {"text": format!("{user} one"), "facialExpression": "smile", "animation": "Talking_0"},
                {"text": format!("{user} two"), "facialExpression": "default", "animation": "Talking_2"}
            ]
        })
        .to_string(),
        Reply::Unavailable => return (StatusCode::SERVICE_UNAVAILABLE, "overloaded").into_response(),
    };

    Json(json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 100, "candidatesTokenCount": 20, "totalTokenCount": 120}
    }))
    .into_response()
}

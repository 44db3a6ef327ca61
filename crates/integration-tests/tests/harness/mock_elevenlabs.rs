//! Mock speech backend
//!
//! The "audio" for a text is the UTF-8 bytes of that text, so responses can
//! be traced back to the message they were synthesized for.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;

pub const API_KEY: &str = "elevenlabs-test-key";
pub const VOICE_ID: &str = "test-voice";

#[derive(Default)]
pub struct Behaviour {
    /// Text that answers with HTTP 500
    pub fail_on: Option<String>,
    /// `/voices` answers with HTTP 500
    pub voices_fail: bool,
    /// Delay before each synthesis response
    pub latency: Option<Duration>,
}

pub struct MockElevenLabs {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockState>,
}

struct MockState {
    behaviour: Behaviour,
    synthesized: Mutex<Vec<(String, String)>>,
}

impl MockElevenLabs {
    pub async fn start(behaviour: Behaviour) -> anyhow::Result<Self> {
        let state = Arc::new(MockState {
            behaviour,
            synthesized: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/v1/text-to-speech/{voice_id}", routing::post(handle_tts))
            .route("/v1/voices", routing::get(handle_voices))
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

    pub async fn healthy() -> Self {
        Self::start(Behaviour::default()).await.unwrap()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// `(voice_id, text)` pairs in arrival order
    pub fn synthesized(&self) -> Vec<(String, String)> {
        self.state.synthesized.lock().unwrap().clone()
    }
}

impl Drop for MockElevenLabs {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[derive(Deserialize)]
struct TtsBody {
    text: String,
    model_id: String,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers.get("xi-api-key").is_some_and(|v| v == API_KEY)
}

async fn handle_tts(
    State(state): State<Arc<MockState>>,
    Path(voice_id): Path<String>,
    headers: HeaderMap,
    Json(body): Json<TtsBody>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "invalid api key").into_response();
    }

    if body.model_id != "eleven_multilingual_v2" {
        return (StatusCode::BAD_REQUEST, "unknown model").into_response();
    }

    state.synthesized.lock().unwrap().push((voice_id, body.text.clone()));

    if let Some(latency) = state.behaviour.latency {
        tokio::time::sleep(latency).await;
    }

    if state.behaviour.fail_on.as_deref() == Some(body.text.as_str()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "synthesis failed").into_response();
    }

    ([(axum::http::header::CONTENT_TYPE, "audio/mpeg")], body.text.into_bytes()).into_response()
}

async fn handle_voices(State(state): State<Arc<MockState>>, headers: HeaderMap) -> Response {
    if state.behaviour.voices_fail || !authorized(&headers) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable").into_response();
    }

    Json(json!({
        "voices": [
            {"voice_id": VOICE_ID, "name": "Wawa", "category": "premade"},
            {"voice_id": "other-voice", "name": "Other", "category": "cloned"}
        ]
    }))
    .into_response()
}

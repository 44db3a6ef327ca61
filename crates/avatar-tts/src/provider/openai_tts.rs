use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::json;

use crate::{error::TtsError, types::SpeechAudio};

use super::SpeechSynthesizer;

const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

const DEFAULT_OPENAI_TTS_MODEL: &str = "tts-1";

/// Built-in voices; the speech endpoint has no catalog route
const OPENAI_VOICES: [&str; 6] = ["alloy", "echo", "fable", "onyx", "nova", "shimmer"];

/// `OpenAI` TTS provider
pub struct OpenAiTtsProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl OpenAiTtsProvider {
    pub fn new(client: Client, api_key: Option<SecretString>, base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_OPENAI_API_URL.to_owned());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_OPENAI_TTS_MODEL.to_owned()),
        }
    }
}

#[derive(serde::Serialize)]
struct OpenAiTtsRequest<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    response_format: &'a str,
}

#[async_trait]
impl SpeechSynthesizer for OpenAiTtsProvider {
    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<SpeechAudio> {
        let url = format!("{}/audio/speech", self.base_url);

        tracing::debug!(model = %self.model, voice, input_len = text.len(), "OpenAI TTS request");

        let body = OpenAiTtsRequest {
            model: &self.model,
            input: text,
            voice,
            response_format: "mp3",
        };

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, "OpenAI TTS request failed");
            TtsError::ConnectionError(format!("Failed to send request to OpenAI TTS: {e}"))
        })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());
            tracing::error!(%status, body = %error_text, "OpenAI TTS API error");
            return Err(TtsError::from_status(status, error_text));
        }

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_owned();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read OpenAI TTS response body");
            TtsError::InternalError(None)
        })?;

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        tracing::debug!(bytes = audio.len(), "OpenAI TTS synthesis complete");

        Ok(SpeechAudio {
            audio: audio.to_vec(),
            content_type,
        })
    }

    async fn list_voices(&self) -> crate::error::Result<serde_json::Value> {
        let voices: Vec<_> = OPENAI_VOICES
            .iter()
            .map(|voice| json!({"voice_id": voice, "name": voice}))
            .collect();

        Ok(json!({ "voices": voices }))
    }

    fn name(&self) -> &str {
        "openai_tts"
    }
}

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::{error::TtsError, types::SpeechAudio};

use super::SpeechSynthesizer;

const DEFAULT_ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1";

/// Model used when none is configured
pub const DEFAULT_ELEVENLABS_MODEL: &str = "eleven_multilingual_v2";

/// `ElevenLabs` TTS provider
pub struct ElevenLabsProvider {
    client: Client,
    base_url: String,
    api_key: Option<SecretString>,
    model: String,
}

impl ElevenLabsProvider {
    pub fn new(client: Client, api_key: Option<SecretString>, base_url: Option<String>, model: Option<String>) -> Self {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_ELEVENLABS_API_URL.to_owned());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_ELEVENLABS_MODEL.to_owned()),
        }
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("xi-api-key", key.expose_secret()),
            None => builder,
        }
    }
}

#[derive(serde::Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

async fn send(request: reqwest::RequestBuilder) -> crate::error::Result<reqwest::Response> {
    let response = request.send().await.map_err(|e| {
        tracing::error!(error = %e, "ElevenLabs request failed");
        TtsError::ConnectionError(format!("Failed to send request to ElevenLabs: {e}"))
    })?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_owned());
    tracing::error!(%status, body = %error_text, "ElevenLabs API error");

    Err(TtsError::from_status(status, error_text))
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsProvider {
    async fn synthesize(&self, text: &str, voice: &str) -> crate::error::Result<SpeechAudio> {
        let url = format!("{}/text-to-speech/{voice}", self.base_url);

        tracing::debug!(model = %self.model, voice, input_len = text.len(), "ElevenLabs TTS request");

        let body = ElevenLabsRequest {
            text,
            model_id: &self.model,
        };

        let request = self
            .authorized(self.client.post(&url))
            .header(http::header::ACCEPT, "audio/mpeg")
            .json(&body);

        let response = send(request).await?;

        let content_type = response
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("audio/mpeg")
            .to_owned();

        let audio = response.bytes().await.map_err(|e| {
            tracing::error!(error = %e, "failed to read ElevenLabs response body");
            TtsError::InternalError(None)
        })?;

        if audio.is_empty() {
            return Err(TtsError::EmptyAudio);
        }

        tracing::debug!(bytes = audio.len(), "ElevenLabs TTS synthesis complete");

        Ok(SpeechAudio {
            audio: audio.to_vec(),
            content_type,
        })
    }

    async fn list_voices(&self) -> crate::error::Result<serde_json::Value> {
        let url = format!("{}/voices", self.base_url);

        let response = send(self.authorized(self.client.get(&url))).await?;

        response.json().await.map_err(|e| {
            tracing::error!(error = %e, "ElevenLabs voice catalog is not JSON");
            TtsError::InternalError(None)
        })
    }

    fn name(&self) -> &str {
        "elevenlabs"
    }
}

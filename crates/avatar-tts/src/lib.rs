//! Speech synthesis providers for the avatar backend

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
mod http_client;
mod provider;
mod types;

use std::sync::Arc;

use avatar_config::{TtsConfig, TtsProviderType};

pub use error::{Result, TtsError};
pub use provider::{
    SpeechSynthesizer,
    elevenlabs::{DEFAULT_ELEVENLABS_MODEL, ElevenLabsProvider},
    openai_tts::OpenAiTtsProvider,
};
pub use types::SpeechAudio;

/// Build the configured speech provider
pub fn from_config(config: &TtsConfig) -> Result<Arc<dyn SpeechSynthesizer>> {
    let client = http_client::http_client()?;

    let provider: Arc<dyn SpeechSynthesizer> = match config.provider_type {
        TtsProviderType::Elevenlabs => Arc::new(ElevenLabsProvider::new(
            client,
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        )),
        TtsProviderType::OpenaiTts => Arc::new(OpenAiTtsProvider::new(
            client,
            config.api_key.clone(),
            config.base_url.clone(),
            config.model.clone(),
        )),
    };

    tracing::debug!(provider = provider.name(), voice = config.voice_id(), "speech provider initialized");

    Ok(provider)
}

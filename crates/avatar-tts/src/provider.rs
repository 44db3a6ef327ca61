pub mod elevenlabs;
pub mod openai_tts;

use async_trait::async_trait;

use crate::{error::Result, types::SpeechAudio};

/// Text-to-speech backend
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken by `voice`
    async fn synthesize(&self, text: &str, voice: &str) -> Result<SpeechAudio>;

    /// Voice catalog as returned by the provider
    async fn list_voices(&self) -> Result<serde_json::Value>;

    /// Get the provider name
    fn name(&self) -> &str;
}

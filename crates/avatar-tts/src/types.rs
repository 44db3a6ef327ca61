/// Synthesized speech returned by a provider
#[derive(Debug, Clone)]
pub struct SpeechAudio {
    /// Raw audio bytes, MP3 encoded
    pub audio: Vec<u8>,
    /// Content type reported by the provider (e.g. "audio/mpeg")
    pub content_type: String,
}

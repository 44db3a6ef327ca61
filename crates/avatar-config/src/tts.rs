use secrecy::SecretString;
use serde::Deserialize;

/// `ElevenLabs` voice of the avatar persona
pub const DEFAULT_VOICE_ID: &str = "kgG7dCoKCfLehAPWkJOE";

/// Voice used with `OpenAI` TTS when none is configured
pub const DEFAULT_OPENAI_VOICE: &str = "alloy";

/// Speech synthesis configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TtsConfig {
    /// Provider type
    #[serde(rename = "type", default)]
    pub provider_type: TtsProviderType,
    /// API key
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<String>,
    /// Voice every reply is spoken with; see [`TtsConfig::voice_id`]
    #[serde(default)]
    pub voice_id: Option<String>,
    /// Provider model identifier
    #[serde(default)]
    pub model: Option<String>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            provider_type: TtsProviderType::default(),
            api_key: None,
            base_url: None,
            voice_id: None,
            model: None,
        }
    }
}

/// Supported TTS providers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TtsProviderType {
    /// `ElevenLabs`
    #[default]
    Elevenlabs,
    /// `OpenAI` TTS
    OpenaiTts,
}

impl TtsProviderType {
    /// Voice used when the config does not name one
    pub const fn default_voice(self) -> &'static str {
        match self {
            Self::Elevenlabs => DEFAULT_VOICE_ID,
            Self::OpenaiTts => DEFAULT_OPENAI_VOICE,
        }
    }
}

impl TtsConfig {
    /// Configured voice, or the provider's default
    pub fn voice_id(&self) -> &str {
        self.voice_id.as_deref().unwrap_or(self.provider_type.default_voice())
    }
}

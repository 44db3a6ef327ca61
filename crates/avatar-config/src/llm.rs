use secrecy::SecretString;
use serde::Deserialize;
use url::Url;

/// Completion provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LlmConfig {
    /// Provider protocol
    #[serde(rename = "type", default)]
    pub provider_type: LlmProviderType,
    /// API key; absent, blank or `-` disables live generation
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override
    #[serde(default)]
    pub base_url: Option<Url>,
    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f64>,
    /// Upper bound on generated tokens
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider_type: LlmProviderType::default(),
            api_key: None,
            base_url: None,
            model: default_model(),
            temperature: None,
            max_tokens: None,
        }
    }
}

/// Supported completion protocols
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LlmProviderType {
    /// Google Generative Language API
    #[default]
    Google,
    /// OpenAI-compatible chat completions
    Openai,
}

fn default_model() -> String {
    "gemini-1.5-pro".to_owned()
}

//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use avatar_config::{Config, CorsConfig, HealthConfig, ServerConfig, ToolConfig};
use secrecy::SecretString;

use super::media::MediaKit;
use super::{mock_elevenlabs, mock_gemini};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Minimal defaults on a loopback address with short tool timeouts
    pub fn new(media: &MediaKit) -> Self {
        let mut config = Config {
            server: ServerConfig {
                listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                health: HealthConfig {
                    enabled: true,
                    ..HealthConfig::default()
                },
                ..ServerConfig::default()
            },
            ..Config::default()
        };

        config.media.fixture_dir = media.fixture_dir();
        config.media.work_dir = Some(media.work_dir());
        config.media.transcoder = media.transcoder();
        config.media.extractor = media.extractor();
        config.media.tool_timeout_secs = 10;

        Self { config }
    }

    /// Point the completion provider at a mock Gemini backend
    pub fn with_gemini(mut self, base_url: &str) -> Self {
        self.config.llm.base_url = Some(base_url.parse().expect("valid URL"));
        self.config.llm.api_key = Some(SecretString::from(mock_gemini::API_KEY));
        self
    }

    /// Point the speech provider at a mock ElevenLabs backend
    pub fn with_elevenlabs(mut self, base_url: &str) -> Self {
        self.config.tts.base_url = Some(base_url.to_owned());
        self.config.tts.api_key = Some(SecretString::from(mock_elevenlabs::API_KEY));
        self.config.tts.voice_id = Some(mock_elevenlabs::VOICE_ID.to_owned());
        self
    }

    /// Replace the speech API key, e.g. with the `-` placeholder
    pub fn with_tts_key(mut self, key: &str) -> Self {
        self.config.tts.api_key = Some(SecretString::from(key));
        self
    }

    pub fn with_extractor(mut self, tool: ToolConfig) -> Self {
        self.config.media.extractor = tool;
        self
    }

    pub fn with_work_dir(mut self, dir: std::path::PathBuf) -> Self {
        self.config.media.work_dir = Some(dir);
        self
    }

    pub fn with_cors(mut self, config: CorsConfig) -> Self {
        self.config.server.cors = Some(config);
        self
    }

    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    pub fn build(self) -> Config {
        self.config.validate().expect("test config must be valid");
        self.config
    }
}

#![allow(clippy::must_use_candidate)]

pub mod cors;
mod credentials;
mod env;
pub mod llm;
mod loader;
pub mod media;
pub mod server;
pub mod telemetry;
pub mod tts;

use serde::Deserialize;

pub use cors::*;
pub use credentials::has_secret;
pub use env::ExpandError;
pub use llm::*;
pub use media::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};
pub use tts::*;

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Completion provider used to script replies
    #[serde(default)]
    pub llm: LlmConfig,
    /// Speech synthesis provider
    #[serde(default)]
    pub tts: TtsConfig,
    /// Fixtures, scratch space and external tools
    #[serde(default)]
    pub media: MediaConfig,
    /// Logging and trace export
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}

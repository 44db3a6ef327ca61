use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use avatar_config::Config;
use clap::Parser;
use secrecy::SecretString;

/// Default configuration file, optional when absent
pub const DEFAULT_CONFIG_PATH: &str = "avatar.toml";

/// Talking avatar backend
#[derive(Debug, Parser)]
#[command(name = "avatar", about = "Chat backend that voices and lip-syncs a 3D avatar")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "AVATAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "AVATAR_LISTEN")]
    pub listen: Option<SocketAddr>,

    /// Override the listen port
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Completion provider API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Speech provider API key
    #[arg(long, env = "ELEVEN_LABS_API_KEY", hide_env_values = true)]
    pub eleven_labs_api_key: Option<String>,

    /// Voice replies are spoken with
    #[arg(long, env = "ELEVEN_LABS_VOICE_ID")]
    pub voice_id: Option<String>,
}

impl Args {
    /// Load the configuration file and apply command-line overrides
    ///
    /// An explicit `--config` must exist; the default path may be missing.
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::load_or_default(Path::new(DEFAULT_CONFIG_PATH))?,
        };

        self.apply(&mut config);
        config.validate()?;

        Ok(config)
    }

    fn apply(&self, config: &mut Config) {
        if let Some(listen) = self.listen {
            config.server.listen_address = Some(listen);
        }

        if let Some(port) = self.port {
            let mut address = config.server.listen_address();
            address.set_port(port);
            config.server.listen_address = Some(address);
        }

        if let Some(key) = &self.gemini_api_key {
            config.llm.api_key = Some(SecretString::from(key.clone()));
        }

        if let Some(key) = &self.eleven_labs_api_key {
            config.tts.api_key = Some(SecretString::from(key.clone()));
        }

        if let Some(voice_id) = &self.voice_id {
            config.tts.voice_id = Some(voice_id.clone());
        }
    }

    /// Config file in effect, for logging
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
    }
}

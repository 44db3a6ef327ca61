use std::path::Path;

use crate::{AnyOrList, Config, ToolConfig};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, variable expansion
    /// fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::from_toml(&raw)
    }

    /// Load configuration if the file exists, otherwise fall back to defaults
    ///
    /// # Errors
    ///
    /// Same as [`Config::load`] once the file is found
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            return Self::load(path);
        }

        tracing::debug!(path = %path.display(), "config file not found, using defaults");
        let config = Self::default();
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from raw TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing or validation fails
    pub fn from_toml(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if a tool invocation or telemetry setting is unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_tool("transcoder", &self.media.transcoder)?;
        validate_tool("extractor", &self.media.extractor)?;

        if self.media.tool_timeout_secs == 0 {
            anyhow::bail!("media.tool_timeout_secs must be greater than 0");
        }

        if let Some(ref telemetry) = self.telemetry
            && !(0.0..=1.0).contains(&telemetry.sampling_rate)
        {
            anyhow::bail!("telemetry.sampling_rate must be between 0.0 and 1.0");
        }

        if self.tts.voice_id.as_deref().is_some_and(|v| v.trim().is_empty()) {
            anyhow::bail!("tts.voice_id must not be empty");
        }

        if let Some(ref cors) = self.server.cors
            && cors.credentials
            && [&cors.origins, &cors.methods, &cors.headers].contains(&&AnyOrList::Any)
        {
            anyhow::bail!("server.cors.credentials requires explicit origins, methods and headers");
        }

        Ok(())
    }
}

fn validate_tool(name: &str, tool: &ToolConfig) -> anyhow::Result<()> {
    if tool.program.as_os_str().is_empty() {
        anyhow::bail!("media.{name}.program must not be empty");
    }

    if !tool.mentions_io() {
        anyhow::bail!("media.{name}.args must reference both {{input}} and {{output}}");
    }

    Ok(())
}

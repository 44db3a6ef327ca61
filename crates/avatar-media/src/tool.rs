//! External command-line tools run as argv vectors

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use async_trait::async_trait;
use avatar_config::{INPUT_PLACEHOLDER, OUTPUT_PLACEHOLDER, ToolConfig};

use crate::error::MediaError;

/// Converts synthesized audio into the format the extractor reads
#[async_trait]
pub trait Transcoder: Send + Sync {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), MediaError>;
}

/// Derives viseme timing JSON from an audio file
#[async_trait]
pub trait TimingExtractor: Send + Sync {
    async fn extract(&self, audio: &Path, output: &Path) -> Result<(), MediaError>;
}

/// A configured program invoked once per file pair
#[derive(Debug, Clone)]
pub struct CommandTool {
    name: String,
    program: PathBuf,
    args: Vec<String>,
    env: Vec<(String, String)>,
    timeout: Duration,
}

impl CommandTool {
    pub fn new(config: &ToolConfig, timeout: Duration) -> Self {
        let name = config
            .program
            .file_name()
            .map_or_else(|| config.program.display().to_string(), |n| n.to_string_lossy().into_owned());

        Self {
            name,
            program: config.program.clone(),
            args: config.args.clone(),
            env: config.env.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
            timeout,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Arguments with the file placeholders substituted
    pub fn argv(&self, input: &Path, output: &Path) -> Vec<String> {
        let input = input.to_string_lossy();
        let output = output.to_string_lossy();

        self.args
            .iter()
            .map(|arg| arg.replace(INPUT_PLACEHOLDER, &input).replace(OUTPUT_PLACEHOLDER, &output))
            .collect()
    }

    /// Run the tool to completion, failing on non-zero exit or timeout
    pub async fn run(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        let mut cmd = tokio::process::Command::new(&self.program);
        cmd.args(self.argv(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        for (k, v) in &self.env {
            cmd.env(k, v);
        }

        let child = cmd.spawn().map_err(|source| MediaError::Spawn {
            tool: self.name.clone(),
            source,
        })?;

        let result = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| MediaError::ToolTimeout {
                tool: self.name.clone(),
                timeout: self.timeout,
            })?;

        let output = result.map_err(|source| MediaError::Spawn {
            tool: self.name.clone(),
            source,
        })?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        tracing::debug!(tool = %self.name, status = %output.status, %stderr, "tool failed");

        Err(MediaError::ToolFailed {
            tool: self.name.clone(),
            status: output.status,
            stderr,
        })
    }
}

#[async_trait]
impl Transcoder for CommandTool {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<(), MediaError> {
        self.run(input, output).await
    }
}

#[async_trait]
impl TimingExtractor for CommandTool {
    async fn extract(&self, audio: &Path, output: &Path) -> Result<(), MediaError> {
        self.run(audio, output).await
    }
}

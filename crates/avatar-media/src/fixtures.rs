//! Pre-rendered audio and timing pairs
//!
//! A fixture named `intro_0` is stored as `intro_0.wav` plus `intro_0.json`
//! in the fixture directory.

use std::path::{Path, PathBuf};

use avatar_core::{ChatMessage, ERROR_FIXTURE, Script};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde_json::Value;

use crate::error::FixtureError;

/// Audio and timing ready to attach to a message
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    /// Base64-encoded audio
    pub audio: String,
    pub lipsync: Value,
}

impl Fixture {
    pub fn attach_to(self, message: &mut ChatMessage) {
        message.attach(self.audio, self.lipsync);
    }
}

fn empty_lipsync() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Read-only view of the fixture directory
#[derive(Debug, Clone)]
pub struct FixtureStore {
    dir: PathBuf,
}

impl FixtureStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Base64-encoded contents of `<name>.wav`
    pub async fn audio(&self, name: &str) -> Result<String, FixtureError> {
        let path = self.dir.join(format!("{name}.wav"));
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| FixtureError::from_io(path, e))?;
        Ok(STANDARD.encode(bytes))
    }

    /// Parsed contents of `<name>.json`
    pub async fn lipsync(&self, name: &str) -> Result<Value, FixtureError> {
        let path = self.dir.join(format!("{name}.json"));
        let raw = tokio::fs::read(&path)
            .await
            .map_err(|e| FixtureError::from_io(path.clone(), e))?;
        serde_json::from_slice(&raw).map_err(|source| FixtureError::Corrupt { path, source })
    }

    /// Load a fixture, replacing each unreadable file with an empty value
    pub async fn load_or_empty(&self, name: &str) -> Fixture {
        let audio = self.audio(name).await.unwrap_or_else(|e| {
            tracing::error!(fixture = name, kind = e.kind(), error = %e, "fixture audio unavailable");
            String::new()
        });

        let lipsync = self.lipsync(name).await.unwrap_or_else(|e| {
            tracing::error!(fixture = name, kind = e.kind(), error = %e, "fixture timing unavailable");
            empty_lipsync()
        });

        Fixture { audio, lipsync }
    }

    /// Error fixture pair, degraded to empty values if unreadable
    pub async fn error_pair(&self) -> Fixture {
        self.load_or_empty(ERROR_FIXTURE).await
    }

    /// Messages of a canned script with their fixtures attached
    pub async fn script(&self, script: Script) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(script.lines().len());

        for line in script.lines() {
            let mut message = line.to_message();
            self.load_or_empty(line.fixture).await.attach_to(&mut message);
            messages.push(message);
        }

        messages
    }
}

//! Scripted-reply generation for the avatar backend
//!
//! Wraps a completion provider (Google Generative Language or an
//! `OpenAI`-compatible endpoint) behind [`CompletionProvider`] and turns the
//! model's raw text into a short list of chat messages.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod protocol;
pub mod provider;
pub mod types;

use std::sync::Arc;

use avatar_config::LlmConfig;
use avatar_core::{ChatMessage, instruction_prompt, normalize_reply};

pub use error::LlmError;
pub use provider::{CompletionProvider, from_config};
pub use types::{Completion, CompletionRequest, Usage};

/// Produces normalized chat messages for a single user turn
#[derive(Clone)]
pub struct ReplyGenerator {
    provider: Arc<dyn CompletionProvider>,
    model: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    prompt: Arc<str>,
}

impl ReplyGenerator {
    pub fn new(provider: Arc<dyn CompletionProvider>, config: &LlmConfig) -> Self {
        Self {
            provider,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            prompt: instruction_prompt().into(),
        }
    }

    /// Build a generator backed by the configured provider
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        Ok(Self::new(provider::from_config(config)?, config))
    }

    /// Name of the underlying provider
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Ask the model for a reply and normalize it into 1 to 3 messages
    ///
    /// Transport and upstream failures are returned as errors. A reply that
    /// arrives but cannot be parsed degrades to a single fallback message.
    pub async fn generate(&self, user_message: &str) -> Result<Vec<ChatMessage>, LlmError> {
        let request = CompletionRequest {
            model: self.model.clone(),
            system: self.prompt.to_string(),
            user: user_message.to_owned(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let completion = self.provider.complete(&request).await?;

        if let Some(usage) = completion.usage {
            tracing::debug!(
                provider = self.provider.name(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                finish_reason = completion.finish_reason.as_deref().unwrap_or("unknown"),
                "completion received"
            );
        }

        Ok(normalize_reply(&completion.text))
    }
}

//! Provider trait and implementations for completion backends

pub mod google;
pub mod openai;

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use avatar_config::{LlmConfig, LlmProviderType};
use reqwest::Client;

use crate::error::LlmError;
use crate::types::{Completion, CompletionRequest};

/// Request timeout for completion calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Trait implemented by each completion backend
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name
    fn name(&self) -> &str;

    /// Send a non-streaming completion request
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError>;
}

/// Build the configured provider
///
/// # Errors
///
/// Returns `LlmError::Config` if the HTTP client cannot be built
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn CompletionProvider>, LlmError> {
    let client = Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| LlmError::Config(format!("failed to build HTTP client: {e}")))?;

    let provider: Arc<dyn CompletionProvider> = match config.provider_type {
        LlmProviderType::Google => Arc::new(google::GoogleProvider::new(client, config)),
        LlmProviderType::Openai => Arc::new(openai::OpenAiProvider::new(client, config)),
    };

    tracing::debug!(provider = provider.name(), model = %config.model, "completion provider initialized");

    Ok(provider)
}

/// Map a non-success upstream response into an error, logging the body
async fn upstream_failure(provider: &str, response: reqwest::Response) -> LlmError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::warn!(provider, %status, "upstream returned error");
    LlmError::Upstream(format!("provider returned {status}: {body}"))
}

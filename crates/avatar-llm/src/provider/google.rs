//! Google Generative Language API provider implementation

use async_trait::async_trait;
use avatar_config::LlmConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{CompletionProvider, upstream_failure};
use crate::error::LlmError;
use crate::protocol::google::{GoogleRequest, GoogleResponse};
use crate::types::{Completion, CompletionRequest};

/// Default Google Generative Language API base URL
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Google Generative Language API provider
pub struct GoogleProvider {
    client: Client,
    base_url: Option<Url>,
    api_key: Option<SecretString>,
}

impl GoogleProvider {
    pub fn new(client: Client, config: &LlmConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    /// Build the `generateContent` endpoint URL for a model
    fn generate_url(&self, model: &str) -> String {
        let base = self
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/');
        format!("{base}/models/{model}:generateContent")
    }
}

#[async_trait]
impl CompletionProvider for GoogleProvider {
    fn name(&self) -> &str {
        "google"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        let wire_request = GoogleRequest::from(request);

        let mut builder = self.client.post(self.generate_url(&request.model)).json(&wire_request);
        if let Some(key) = &self.api_key {
            builder = builder.query(&[("key", key.expose_secret())]);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = "google", error = %e, "upstream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(upstream_failure(self.name(), response).await);
        }

        let wire_response: GoogleResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Completion::try_from(wire_response)
    }
}

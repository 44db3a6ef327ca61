//! OpenAI-compatible provider implementation

use async_trait::async_trait;
use avatar_config::LlmConfig;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{CompletionProvider, upstream_failure};
use crate::error::LlmError;
use crate::protocol::openai::{OpenAiRequest, OpenAiResponse};
use crate::types::{Completion, CompletionRequest};

/// Default `OpenAI` API base URL
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-compatible provider
pub struct OpenAiProvider {
    client: Client,
    base_url: Option<Url>,
    api_key: Option<SecretString>,
}

impl OpenAiProvider {
    pub fn new(client: Client, config: &LlmConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn completions_url(&self) -> String {
        let base = self
            .base_url
            .as_ref()
            .map_or(DEFAULT_BASE_URL, Url::as_str)
            .trim_end_matches('/');
        format!("{base}/chat/completions")
    }
}

#[async_trait]
impl CompletionProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<Completion, LlmError> {
        let wire_request = OpenAiRequest::from(request);

        let mut builder = self.client.post(self.completions_url()).json(&wire_request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key.expose_secret());
        }

        let response = builder.send().await.map_err(|e| {
            tracing::error!(provider = "openai", error = %e, "upstream request failed");
            LlmError::Upstream(e.to_string())
        })?;

        if !response.status().is_success() {
            return Err(upstream_failure(self.name(), response).await);
        }

        let wire_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Upstream(format!("failed to parse response: {e}")))?;

        Completion::try_from(wire_response)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn bearer_key_and_chat_completions_path() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"messages\": []}"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = LlmConfig {
            api_key: Some(SecretString::from("sk-test".to_owned())),
            base_url: Some(Url::parse(&format!("{}/v1", server.uri())).unwrap()),
            model: "gpt-4o-mini".to_owned(),
            ..LlmConfig::default()
        };

        let request = CompletionRequest {
            model: config.model.clone(),
            system: "s".to_owned(),
            user: "u".to_owned(),
            temperature: None,
            max_tokens: None,
        };

        let completion = OpenAiProvider::new(Client::new(), &config)
            .complete(&request)
            .await
            .unwrap();
        assert_eq!(completion.text, "{\"messages\": []}");
    }
}

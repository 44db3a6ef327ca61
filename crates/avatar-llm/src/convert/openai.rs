//! Conversion between internal types and `OpenAI` wire format

use crate::error::LlmError;
use crate::protocol::openai::{OpenAiMessage, OpenAiRequest, OpenAiResponse};
use crate::types::{Completion, CompletionRequest, Usage};

impl From<&CompletionRequest> for OpenAiRequest {
    fn from(req: &CompletionRequest) -> Self {
        Self {
            model: req.model.clone(),
            messages: vec![
                OpenAiMessage {
                    role: "system".to_owned(),
                    content: Some(req.system.clone()),
                },
                OpenAiMessage {
                    role: "user".to_owned(),
                    content: Some(req.user.clone()),
                },
            ],
            temperature: req.temperature,
            max_tokens: req.max_tokens,
        }
    }
}

impl TryFrom<OpenAiResponse> for Completion {
    type Error = LlmError;

    fn try_from(response: OpenAiResponse) -> Result<Self, Self::Error> {
        let usage = response.usage.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
        });

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyCompletion("no choices returned".to_owned()))?;

        let text = choice.message.content.unwrap_or_default();
        if text.trim().is_empty() && choice.finish_reason.as_deref() == Some("content_filter") {
            return Err(LlmError::EmptyCompletion("content_filter".to_owned()));
        }

        Ok(Self {
            text,
            finish_reason: choice.finish_reason,
            usage,
        })
    }
}

//! Conversion between internal types and Google Generative Language wire format

use crate::error::LlmError;
use crate::protocol::google::{GoogleContent, GoogleGenerationConfig, GooglePart, GoogleRequest, GoogleResponse};
use crate::types::{Completion, CompletionRequest, Usage};

// -- Outbound: internal request -> Google wire request --

impl From<&CompletionRequest> for GoogleRequest {
    fn from(req: &CompletionRequest) -> Self {
        let generation_config = (req.temperature.is_some() || req.max_tokens.is_some()).then(|| GoogleGenerationConfig {
            temperature: req.temperature,
            max_output_tokens: req.max_tokens,
        });

        Self {
            contents: vec![GoogleContent {
                role: Some("user".to_owned()),
                parts: vec![GooglePart::text(req.user.clone())],
            }],
            system_instruction: Some(GoogleContent {
                role: None,
                parts: vec![GooglePart::text(req.system.clone())],
            }),
            generation_config,
        }
    }
}

// -- Inbound: Google wire response -> internal completion --

impl TryFrom<GoogleResponse> for Completion {
    type Error = LlmError;

    fn try_from(response: GoogleResponse) -> Result<Self, Self::Error> {
        let usage = response.usage_metadata.as_ref().map(|u| Usage {
            prompt_tokens: u.prompt_token_count,
            completion_tokens: u.candidates_token_count,
        });

        let Some(candidate) = response.candidates.into_iter().next() else {
            let reason = response
                .prompt_feedback
                .and_then(|f| f.block_reason)
                .unwrap_or_else(|| "no candidates returned".to_owned());
            return Err(LlmError::EmptyCompletion(reason));
        };

        let text: String = candidate
            .content
            .into_iter()
            .flat_map(|content| content.parts)
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty()
            && let Some(reason) = candidate.finish_reason.as_deref().filter(|r| is_blocked(r))
        {
            return Err(LlmError::EmptyCompletion(reason.to_owned()));
        }

        Ok(Self {
            text,
            finish_reason: candidate.finish_reason,
            usage,
        })
    }
}

/// Finish reasons for which the candidate was withheld by safety filtering
const BLOCKED_FINISH_REASONS: &[&str] = &["SAFETY", "RECITATION", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

fn is_blocked(finish_reason: &str) -> bool {
    BLOCKED_FINISH_REASONS.contains(&finish_reason)
}

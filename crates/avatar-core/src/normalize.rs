//! Turning raw model text into a list of chat messages

use serde::Deserialize;

use crate::{
    message::{ChatMessage, MAX_MESSAGES},
    script,
};

/// Remove markdown code-fence markers and surrounding whitespace
///
/// Every "```json" marker (with its trailing newline, if any) and every
/// remaining "```" marker is dropped; the text in between is kept as is.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json\n", "")
        .replace("```json", "")
        .replace("```", "")
        .trim()
        .to_owned()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Reply {
    Wrapped { messages: Vec<ChatMessage> },
    Bare(Vec<ChatMessage>),
}

impl From<Reply> for Vec<ChatMessage> {
    fn from(reply: Reply) -> Self {
        match reply {
            Reply::Wrapped { messages } | Reply::Bare(messages) => messages,
        }
    }
}

/// Normalize raw completion text into 1 to [`MAX_MESSAGES`] messages
///
/// Accepts a bare array or an object with a `messages` array, optionally
/// fenced. Output that does not parse, or parses to an empty list, is
/// replaced with a single apologetic message rather than failing.
pub fn normalize_reply(raw: &str) -> Vec<ChatMessage> {
    let cleaned = strip_code_fences(raw);

    let mut messages: Vec<ChatMessage> = match serde_json::from_str::<Reply>(&cleaned) {
        Ok(reply) => reply.into(),
        Err(e) => {
            tracing::warn!(error = %e, "model reply is not a message list, using fallback");
            return vec![script::unparseable_reply()];
        }
    };

    if messages.is_empty() {
        tracing::warn!("model reply contained no messages, using fallback");
        return vec![script::unparseable_reply()];
    }

    if messages.len() > MAX_MESSAGES {
        tracing::debug!(received = messages.len(), "truncating model reply");
        messages.truncate(MAX_MESSAGES);
    }

    messages
}

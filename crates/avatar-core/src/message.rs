use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Upper bound on messages in one reply
pub const MAX_MESSAGES: usize = 3;

/// Facial expression the avatar wears while speaking a message
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::VariantNames,
)]
#[strum(serialize_all = "camelCase")]
pub enum FacialExpression {
    Smile,
    Sad,
    Angry,
    Surprised,
    FunnyFace,
    #[default]
    Default,
}

/// Body animation the avatar plays while speaking a message
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, strum::EnumString, strum::Display, strum::VariantNames,
)]
pub enum Animation {
    #[strum(serialize = "Talking_0")]
    Talking0,
    #[strum(serialize = "Talking_1")]
    Talking1,
    #[strum(serialize = "Talking_2")]
    Talking2,
    Crying,
    Laughing,
    Rumba,
    #[default]
    Idle,
    Terrified,
    Angry,
}

/// Tags chosen by the model travel as plain strings. Anything else (an
/// unknown name, `null`, a number) falls back to the neutral variant so one
/// bad tag never rejects the rest of the reply.
fn lenient_tag<'de, D, T>(deserializer: D, kind: &'static str) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<Value>::deserialize(deserializer)?;

    if let Some(tag) = raw.as_ref().and_then(Value::as_str).and_then(|s| s.parse().ok()) {
        return Ok(tag);
    }

    if let Some(value) = raw {
        tracing::warn!(kind, %value, "unknown tag from model, using default");
    }
    Ok(T::default())
}

fn tag_to_str<S: Serializer>(tag: &impl Display, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(tag)
}

impl Serialize for FacialExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        tag_to_str(self, serializer)
    }
}

impl<'de> Deserialize<'de> for FacialExpression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_tag(deserializer, "facialExpression")
    }
}

impl Serialize for Animation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        tag_to_str(self, serializer)
    }
}

impl<'de> Deserialize<'de> for Animation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_tag(deserializer, "animation")
    }
}

/// One spoken segment of a reply
///
/// `audio` (base64) and `lipsync` (viseme timing JSON) are attached by the
/// media pipeline or taken from a fixture before the message leaves the
/// service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub text: String,
    #[serde(default)]
    pub facial_expression: FacialExpression,
    #[serde(default)]
    pub animation: Animation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lipsync: Option<Value>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, facial_expression: FacialExpression, animation: Animation) -> Self {
        Self {
            text: text.into(),
            facial_expression,
            animation,
            audio: None,
            lipsync: None,
        }
    }

    /// Attach encoded audio and its viseme timing
    pub fn attach(&mut self, audio: String, lipsync: Value) {
        self.audio = Some(audio);
        self.lipsync = Some(lipsync);
    }

    /// Whether both media fields are set
    pub const fn has_media(&self) -> bool {
        self.audio.is_some() && self.lipsync.is_some()
    }
}

/// `/chat` request body
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
}

impl ChatRequest {
    /// The user's message, if it carries any non-whitespace text
    pub fn user_message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// `/chat` response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub messages: Vec<ChatMessage>,
}

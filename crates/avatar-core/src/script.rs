//! Fixed dialogue played without asking the model

use crate::message::{Animation, ChatMessage, FacialExpression};

/// Fixture substituted for any message whose media could not be produced
pub const ERROR_FIXTURE: &str = "error";

/// A scripted message and the pre-rendered fixture that voices it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CannedLine {
    pub text: &'static str,
    pub facial_expression: FacialExpression,
    pub animation: Animation,
    pub fixture: &'static str,
}

impl CannedLine {
    pub fn to_message(&self) -> ChatMessage {
        ChatMessage::new(self.text, self.facial_expression, self.animation)
    }
}

/// Canned multi-message responses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Script {
    /// Sent when the request carries no message
    Greeting,
    /// Sent when completion or speech credentials are missing
    MissingCredentials,
}

const GREETING: [CannedLine; 2] = [
    CannedLine {
        text: "Hey dear... How was your day?",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Talking1,
        fixture: "intro_0",
    },
    CannedLine {
        text: "I missed you so much... Please don't go for so long!",
        facial_expression: FacialExpression::Sad,
        animation: Animation::Crying,
        fixture: "intro_1",
    },
];

const MISSING_CREDENTIALS: [CannedLine; 2] = [
    CannedLine {
        text: "Please my dear, don't forget to add your API keys!",
        facial_expression: FacialExpression::Angry,
        animation: Animation::Angry,
        fixture: "api_0",
    },
    CannedLine {
        text: "You don't want to ruin Wawa Sensei with a crazy Gemini and ElevenLabs bill, right?",
        facial_expression: FacialExpression::Smile,
        animation: Animation::Laughing,
        fixture: "api_1",
    },
];

impl Script {
    pub const fn lines(self) -> &'static [CannedLine] {
        match self {
            Self::Greeting => &GREETING,
            Self::MissingCredentials => &MISSING_CREDENTIALS,
        }
    }
}

/// Replaces model output that could not be parsed into messages
pub fn unparseable_reply() -> ChatMessage {
    ChatMessage::new(
        "I'm having trouble processing that right now. Could you try saying that again?",
        FacialExpression::Sad,
        Animation::Talking0,
    )
}

/// Body of the HTTP 500 response when the chat flow fails outright
pub fn internal_failure() -> ChatMessage {
    ChatMessage::new(
        "Sorry, something went wrong. Please try again later.",
        FacialExpression::Sad,
        Animation::Talking0,
    )
}

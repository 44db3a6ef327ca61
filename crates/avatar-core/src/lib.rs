#![allow(clippy::must_use_candidate)]

mod error;
mod message;
mod normalize;
mod prompt;
mod script;

pub use error::HttpError;
pub use message::{Animation, ChatMessage, ChatRequest, ChatResponse, FacialExpression, MAX_MESSAGES};
pub use normalize::{normalize_reply, strip_code_fences};
pub use prompt::instruction_prompt;
pub use script::{CannedLine, ERROR_FIXTURE, Script, internal_failure, unparseable_reply};

use avatar_core::HttpError;
use http::StatusCode;
use thiserror::Error;

/// Errors that can occur while requesting a scripted reply
#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream provider could not be reached or returned an error status
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Upstream withheld the reply (no candidates, or blocked by a filter)
    #[error("empty completion: {0}")]
    EmptyCompletion(String),

    /// Provider could not be constructed from configuration
    #[error("configuration error: {0}")]
    Config(String),
}

impl HttpError for LlmError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Upstream(_) | Self::EmptyCompletion(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::Upstream(_) => "upstream_error",
            Self::EmptyCompletion(_) => "empty_completion_error",
            Self::Config(_) => "configuration_error",
        }
    }
}

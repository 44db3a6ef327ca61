use avatar_core::HttpError;
use http::StatusCode;
use thiserror::Error;

pub type Result<T, E = TtsError> = std::result::Result<T, E>;

/// Errors returned by speech providers
#[derive(Debug, Error)]
pub enum TtsError {
    /// Provider could not be reached
    #[error("connection error: {0}")]
    ConnectionError(String),

    /// Provider rejected the API key
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider rejected the request body or voice
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Provider answered with another non-success status
    #[error("provider API error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Provider answered 2xx with no audio
    #[error("provider returned no audio")]
    EmptyAudio,

    /// Provider could not be constructed
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error")]
    InternalError(Option<String>),
}

impl TtsError {
    /// Map a non-success status and body to an error
    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            401 => Self::AuthenticationFailed(body),
            400 | 422 => Self::InvalidRequest(body),
            code => Self::ProviderApiError { status: code, message: body },
        }
    }
}

impl HttpError for TtsError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ConnectionError(_) | Self::AuthenticationFailed(_) | Self::EmptyAudio => StatusCode::BAD_GATEWAY,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::ProviderApiError { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::ConfigError(_) | Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::ConnectionError(_) => "connection_error",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::ProviderApiError { .. } => "provider_api_error",
            Self::EmptyAudio => "empty_audio_error",
            Self::ConfigError(_) => "configuration_error",
            Self::InternalError(_) => "internal_error",
        }
    }
}

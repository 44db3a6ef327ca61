use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each provider crate's error type so the server can log
/// and classify failures without depending on provider internals.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `upstream_error`)
    fn error_type(&self) -> &str;
}

use axum::response::IntoResponse;
use http::StatusCode;

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Plain-text greeting at `/`
pub async fn root_handler() -> &'static str {
    "Hello World!"
}

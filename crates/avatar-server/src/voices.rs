use std::sync::Arc;

use avatar_core::HttpError;
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;

use crate::AppState;

/// `GET /voices`, the speech provider's voice catalog
pub async fn voices_handler(State(state): State<Arc<AppState>>) -> Response {
    match state.media.synthesizer().list_voices().await {
        Ok(voices) => Json(voices).into_response(),
        Err(e) => {
            tracing::error!(error = %e, error_type = e.error_type(), "failed to fetch voices");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": "Failed to fetch voices"})),
            )
                .into_response()
        }
    }
}

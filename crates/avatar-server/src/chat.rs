use std::sync::Arc;

use avatar_core::{ChatRequest, ChatResponse, HttpError, Script, internal_failure};
use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use http::StatusCode;

use crate::{AppState, payload::JsonOrEmpty};

/// `POST /chat`
///
/// Empty input gets the greeting script and missing credentials get the
/// configuration warning, both without calling any provider. Otherwise the
/// model's reply is normalized and voiced message by message.
pub async fn chat_handler(State(state): State<Arc<AppState>>, JsonOrEmpty(request): JsonOrEmpty<ChatRequest>) -> Response {
    let Some(user_message) = request.user_message() else {
        tracing::debug!("empty message, sending greeting");
        return scripted(&state, Script::Greeting).await;
    };

    if !state.credentials_ready {
        tracing::warn!("completion or speech API key missing, sending configuration warning");
        return scripted(&state, Script::MissingCredentials).await;
    }

    let mut messages = match state.replies.generate(user_message).await {
        Ok(messages) => messages,
        Err(e) => {
            tracing::error!(
                error = %e,
                error_type = e.error_type(),
                status = %e.status_code(),
                "reply generation failed"
            );
            return failure(&state).await;
        }
    };

    state.media.render(&mut messages).await;

    tracing::debug!(count = messages.len(), "chat reply ready");

    (StatusCode::OK, Json(ChatResponse { messages })).into_response()
}

async fn scripted(state: &AppState, script: Script) -> Response {
    let messages = state.media.fixtures().script(script).await;
    (StatusCode::OK, Json(ChatResponse { messages })).into_response()
}

async fn failure(state: &AppState) -> Response {
    let mut message = internal_failure();
    state.media.fixtures().error_pair().await.attach_to(&mut message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ChatResponse { messages: vec![message] }),
    )
        .into_response()
}

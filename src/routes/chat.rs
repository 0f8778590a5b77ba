use axum::{Json, body::Bytes, extract::State};
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppError,
    message::{ChatRequest, ChatResponse},
    state::SharedState,
};

/// `POST /api/chat`: forward one message upstream and relay the reply.
pub async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<ChatResponse>, AppError> {
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    relay(state, body).instrument(span).await
}

async fn relay(state: SharedState, body: Bytes) -> Result<Json<ChatResponse>, AppError> {
    let message = ChatRequest::trimmed_message(&body).inspect_err(|_| {
        tracing::debug!(bytes = body.len(), "rejected chat body");
    })?;

    let Some(api_key) = state.credential.resolve() else {
        tracing::error!("upstream credential is not configured");
        return Err(AppError::Unconfigured);
    };

    tracing::debug!(chars = message.chars().count(), "forwarding message upstream");
    let reply = state
        .upstream
        .complete(&api_key, &state.system_prompt, &message)
        .await?;
    tracing::info!(chars = reply.chars().count(), "upstream replied");

    Ok(Json(ChatResponse { reply }))
}

/// Any non-POST method on `/api/chat`.
pub async fn method_not_allowed() -> AppError {
    AppError::InvalidMethod
}

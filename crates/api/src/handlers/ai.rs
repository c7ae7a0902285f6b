//! AI chat proxy.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use vitals_ai::ChatMessage;

use crate::error::{AppError, AppResult};
use crate::middleware::json::ValidJson;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /ai/chat
///
/// Forwards the conversation to the inference endpoint and returns the
/// reply. An empty conversation is rejected before any upstream call.
pub async fn chat(
    State(state): State<AppState>,
    ValidJson(input): ValidJson<ChatRequest>,
) -> AppResult<impl IntoResponse> {
    if input.messages.is_empty() {
        return Err(AppError::BadRequest("messages[] required".into()));
    }

    let client = state.chat.as_ref().ok_or(AppError::NotConfigured("AI chat"))?;
    let response = client.complete(&input.messages).await?;

    tracing::info!(turns = input.messages.len(), "AI chat completed");

    Ok(Json(ChatResponse { response }))
}

//! Supportive companion handler

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{read_json, AppError, AppState};
use feelwrite_core::{companion_reply, ChatMessage, Error};

#[derive(Debug, Deserialize)]
pub struct CompletionBody {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResponse {
    pub message: String,
}

/// POST /api/completion - Next companion reply for a conversation
pub async fn create_completion(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<CompletionResponse>, AppError> {
    let body: CompletionBody = read_json(request).await?;
    if body.messages.is_empty() {
        return Err(AppError::bad_request("Messages array is required"));
    }

    let ai = state
        .ai
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("AI backend not configured"))?;

    match companion_reply(ai, &body.messages, &state.app_config.companion).await {
        Ok(message) => Ok(Json(CompletionResponse { message })),
        Err(Error::InvalidData(msg)) => Err(AppError::bad_request(&msg)),
        Err(e) => {
            warn!(error = %e, "Companion reply failed");
            Err(AppError::internal("Failed to generate response"))
        }
    }
}

//! Health check handler

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;
use feelwrite_core::AIBackend;

/// AI backend details reported by the health check
#[derive(Debug, Serialize)]
pub struct AiStatus {
    pub host: String,
    pub model: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Absent when no backend is configured
    pub ai: Option<AiStatus>,
}

/// GET /api/health - Liveness and AI backend presence
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        ai: state.ai.as_ref().map(|ai| AiStatus {
            host: ai.host().to_string(),
            model: ai.model().to_string(),
        }),
    })
}

//! Reflection prompt handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::emotions::CategoryQuery;
use crate::{AppError, AppState};
use feelwrite_core::models::Prompt;

/// GET /api/prompts - Active prompts, optionally for one category
pub async fn list_prompts(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<Prompt>>, AppError> {
    let category = params.parse()?;
    Ok(Json(state.db.list_prompts(category)?))
}

/// GET /api/prompts/random - One random prompt (defaults to the anxious category)
pub async fn random_prompt(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Prompt>, AppError> {
    let category = params.parse()?;
    let mut rng = StdRng::from_os_rng();
    let prompt = state
        .db
        .random_prompt(category, &mut rng)
        .map_err(AppError::from_core)?;
    Ok(Json(prompt))
}

//! Emotion taxonomy handlers

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::{AppError, AppState};
use feelwrite_core::models::{CategoryInfo, EmotionCategory, SubEmotion};

/// Optional category filter
#[derive(Debug, Deserialize)]
pub struct CategoryQuery {
    pub category: Option<String>,
}

impl CategoryQuery {
    pub(crate) fn parse(&self) -> Result<Option<EmotionCategory>, AppError> {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .map(|c| c.parse().map_err(|e: String| AppError::bad_request(&e)))
            .transpose()
    }
}

/// GET /api/emotions/categories - All emotion categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryInfo>>, AppError> {
    Ok(Json(state.db.list_categories()?))
}

/// GET /api/emotions/sub-emotions - Sub-emotions, optionally for one category
pub async fn list_sub_emotions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CategoryQuery>,
) -> Result<Json<Vec<SubEmotion>>, AppError> {
    let category = params.parse()?;
    Ok(Json(state.db.list_sub_emotions(category)?))
}

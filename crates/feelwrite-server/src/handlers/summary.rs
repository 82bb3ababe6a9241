//! Weekly summary, streak and stats handlers
//!
//! `/api/journal/weekly-summary` and `/api/user/weekly-summary` share
//! [`weekly_summary`].

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{AppError, AppState};
use feelwrite_core::models::{StreakInfo, UserStats, WeeklySummary};
use feelwrite_core::WeeklyAggregator;

/// Query parameters identifying the user
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: String,
}

impl UserQuery {
    fn user_id(&self) -> Result<&str, AppError> {
        let id = self.user_id.trim();
        if id.is_empty() {
            return Err(AppError::bad_request("user_id is required"));
        }
        Ok(id)
    }
}

/// GET /api/journal/weekly-summary - Emotional summary of the last week
pub async fn weekly_summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<WeeklySummary>, AppError> {
    let user_id = params.user_id()?;

    let aggregator = WeeklyAggregator::new(&state.db, state.ai.as_ref(), &state.app_config.insights);
    let summary = aggregator.get_weekly_summary(user_id, Utc::now()).await?;

    Ok(Json(summary))
}

/// GET /api/user/streak - Journaling streak
pub async fn user_streak(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<StreakInfo>, AppError> {
    let user_id = params.user_id()?;
    Ok(Json(state.db.user_streak(user_id, Utc::now().date_naive())?))
}

/// GET /api/user/stats - Aggregate statistics
pub async fn user_stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UserQuery>,
) -> Result<Json<UserStats>, AppError> {
    let user_id = params.user_id()?;
    Ok(Json(state.db.user_stats(user_id, Utc::now().date_naive())?))
}

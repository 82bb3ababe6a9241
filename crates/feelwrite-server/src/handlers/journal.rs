//! Journal entry handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    Json,
};
use serde::Deserialize;

use crate::{get_user_email, read_json, AppError, AppState, MAX_PAGE_LIMIT};
use feelwrite_core::models::{EmotionCategory, JournalEntry, NewJournalEntry};

/// Query parameters for listing entries
#[derive(Debug, Deserialize)]
pub struct ListEntriesQuery {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl ListEntriesQuery {
    fn page(&self) -> (i64, i64) {
        (self.skip.max(0), self.limit.clamp(1, MAX_PAGE_LIMIT))
    }
}

/// Request body for creating an entry
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    pub user_id: String,
    pub category: String,
    pub sub_emotion: String,
    pub text: String,
    #[serde(default)]
    pub photo_url: Option<String>,
}

/// Request body for appending a reflection
#[derive(Debug, Deserialize)]
pub struct ReflectionRequest {
    pub prompt: String,
    pub response: String,
}

/// POST /api/journal - Create a journal entry
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<JournalEntry>, AppError> {
    let user_email = get_user_email(request.headers());
    let req: CreateEntryRequest = read_json(request).await?;

    let category: EmotionCategory = req
        .category
        .parse()
        .map_err(|e: String| AppError::bad_request(&e))?;

    let entry = state
        .db
        .create_entry(&NewJournalEntry {
            user_id: req.user_id,
            category,
            sub_emotion: req.sub_emotion,
            text: req.text,
            photo_url: req.photo_url,
            created_at: None,
        })
        .map_err(AppError::from_core)?;

    state.db.log_audit(
        &user_email,
        "create",
        Some("journal_entry"),
        Some(&entry.id),
        Some(&format!("category={}, sub_emotion={}", entry.category, entry.sub_emotion)),
    )?;

    Ok(Json(entry))
}

/// GET /api/journal - List entries, newest first
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListEntriesQuery>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let (skip, limit) = params.page();
    Ok(Json(state.db.list_entries(skip, limit)?))
}

/// GET /api/journal/user/:user_id - List a user's entries, newest first
pub async fn list_user_entries(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    Query(params): Query<ListEntriesQuery>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let (skip, limit) = params.page();
    Ok(Json(state.db.list_entries_for_user(&user_id, skip, limit)?))
}

/// GET /api/journal/:id - Get one entry
pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<JournalEntry>, AppError> {
    let entry = state.db.get_entry(&id).map_err(AppError::from_core)?;
    Ok(Json(entry))
}

/// PATCH /api/journal/:id - Append a reflection
pub async fn append_reflection(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<JournalEntry>, AppError> {
    let user_email = get_user_email(request.headers());
    let req: ReflectionRequest = read_json(request).await?;

    let entry = state
        .db
        .append_reflection(&id, &req.prompt, &req.response)
        .map_err(AppError::from_core)?;

    state.db.log_audit(
        &user_email,
        "reflect",
        Some("journal_entry"),
        Some(&id),
        Some(&format!("reflections={}", entry.reflections.len())),
    )?;

    Ok(Json(entry))
}

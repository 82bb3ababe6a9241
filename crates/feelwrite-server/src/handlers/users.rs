//! User account handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Request, State},
    Json,
};

use crate::{get_user_email, read_json, AppError, AppState, SuccessResponse};
use feelwrite_core::models::{NewUser, User, UserUpdate};

/// POST /api/users - Register a user
///
/// Duplicate email or username is a 400.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Json<User>, AppError> {
    let user_email = get_user_email(request.headers());
    let req: NewUser = read_json(request).await?;

    let user = state.db.create_user(&req).map_err(AppError::from_core)?;

    state.db.log_audit(
        &user_email,
        "create",
        Some("user"),
        Some(&user.id),
        Some(&format!("username={}", user.username)),
    )?;

    Ok(Json(user))
}

/// GET /api/users/:id
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(state.db.get_user(&id).map_err(AppError::from_core)?))
}

/// PUT /api/users/:id - Partial update (email, username, password)
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<User>, AppError> {
    let user_email = get_user_email(request.headers());
    let req: UserUpdate = read_json(request).await?;

    let user = state
        .db
        .update_user(&id, &req)
        .map_err(AppError::from_core)?;

    let mut changed = Vec::new();
    if req.email.is_some() {
        changed.push("email");
    }
    if req.username.is_some() {
        changed.push("username");
    }
    if req.password.is_some() {
        changed.push("password");
    }
    state.db.log_audit(
        &user_email,
        "update",
        Some("user"),
        Some(&id),
        Some(&format!("fields={}", changed.join(","))),
    )?;

    Ok(Json(user))
}

/// DELETE /api/users/:id
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request: Request,
) -> Result<Json<SuccessResponse>, AppError> {
    let user_email = get_user_email(request.headers());

    state.db.delete_user(&id).map_err(AppError::from_core)?;
    state
        .db
        .log_audit(&user_email, "delete", Some("user"), Some(&id), None)?;

    Ok(Json(SuccessResponse { success: true }))
}

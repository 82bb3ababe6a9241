//! Feel-Write Web Server
//!
//! Axum-based REST API for the Feel-Write journaling backend.
//!
//! Security features:
//! - Bearer API-key authentication (secure by default, use --no-auth for local dev)
//! - Restrictive CORS policy
//! - Input validation (pagination limits, body size limits)
//! - Audit logging for all writes
//! - Sanitized error responses

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{de::DeserializeOwned, Serialize};
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use feelwrite_core::{AIBackend, AIClient, AppConfig, Database};

mod handlers;

/// Maximum JSON request body size (64 KB)
pub const MAX_BODY_SIZE: usize = 64 * 1024;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = feelwrite_core::db::MAX_PAGE_SIZE;

/// Authorization header for API key auth
const AUTHORIZATION_HEADER: &str = "authorization";

/// Server configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// Whether authentication is required (secure by default)
    pub require_auth: bool,
    /// Allowed CORS origins (empty = same-origin only)
    pub allowed_origins: Vec<String>,
    /// API keys accepted as "Bearer <key>" in the Authorization header
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

impl ServerConfig {
    /// Read `FEELWRITE_API_KEYS` and `FEELWRITE_ALLOWED_ORIGINS`
    pub fn from_env() -> Self {
        Self {
            require_auth: true,
            allowed_origins: split_list(std::env::var("FEELWRITE_ALLOWED_ORIGINS").ok()),
            api_keys: split_list(std::env::var("FEELWRITE_API_KEYS").ok()),
        }
    }
}

/// Split a comma-separated list, dropping blanks
pub fn split_list(value: Option<String>) -> Vec<String> {
    value
        .map(|v| {
            v.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub app_config: AppConfig,
    pub ai: Option<AIClient>,
}

/// Authentication middleware - validates bearer API keys
///
/// Keys are compared in constant time.
async fn auth_middleware(State(state): State<Arc<AppState>>, request: Request, next: Next) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let api_key_valid = request
        .headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);

    if api_key_valid {
        tracing::debug!(path = %request.uri().path(), "Authenticated via API key");
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Unauthorized request - no valid auth");
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": "Authentication required"
        })),
    )
        .into_response()
}

fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    let provided_bytes = provided.as_bytes();

    for key in valid_keys {
        let key_bytes = key.as_bytes();
        // ct_eq is only constant-time for equal lengths
        if provided_bytes.len() == key_bytes.len() && bool::from(provided_bytes.ct_eq(key_bytes)) {
            return true;
        }
    }
    false
}

/// Identify the caller for audit logging
/// Returns "api-key" for API key auth, or "local-dev" for unauthenticated
pub fn get_user_email(headers: &axum::http::HeaderMap) -> String {
    if headers
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer "))
        .is_some()
    {
        return "api-key".to_string();
    }

    "local-dev".to_string()
}

/// Read and parse a JSON request body
pub(crate) async fn read_json<T: DeserializeOwned>(request: Request) -> Result<T, AppError> {
    let bytes = axum::body::to_bytes(request.into_body(), MAX_BODY_SIZE)
        .await
        .map_err(|_| AppError::bad_request("Invalid request body"))?;
    serde_json::from_slice(&bytes).map_err(|e| AppError::bad_request(&format!("Invalid JSON: {}", e)))
}

/// Success response
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
///
/// The AI client is read from the environment.
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    let ai = AIClient::from_env();
    match ai {
        Some(ref client) => info!(host = %client.host(), model = %client.model(), "AI backend configured"),
        None => info!("AI backend not configured (set OPENAI_API_KEY or OLLAMA_HOST to enable AI insights)"),
    }
    create_router_with_options(db, static_dir, config, AppConfig::default(), ai)
}

/// Create the application router with explicit configuration (for testing)
pub fn create_router_with_options(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    app_config: AppConfig,
    ai: Option<AIClient>,
) -> Router {
    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        app_config,
        ai,
    });

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        // Journal
        .route(
            "/journal",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/journal/weekly-summary", get(handlers::weekly_summary))
        .route("/journal/user/:user_id", get(handlers::list_user_entries))
        .route(
            "/journal/:id",
            get(handlers::get_entry).patch(handlers::append_reflection),
        )
        // User summary routes
        .route("/user/weekly-summary", get(handlers::weekly_summary))
        .route("/user/streak", get(handlers::user_streak))
        .route("/user/stats", get(handlers::user_stats))
        // Taxonomy
        .route("/emotions/categories", get(handlers::list_categories))
        .route("/emotions/sub-emotions", get(handlers::list_sub_emotions))
        // Prompts
        .route("/prompts", get(handlers::list_prompts))
        .route("/prompts/random", get(handlers::random_prompt))
        // Users
        .route("/users", post(handlers::create_user))
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        // Companion
        .route("/completion", post(handlers::create_completion))
        // Audit
        .route("/audit", get(handlers::list_audit_log));

    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let cors = if config.allowed_origins.is_empty() {
        // Restrictive default: only allow same-origin
        CorsLayer::new()
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    };

    let csp_value = HeaderValue::from_static(
        "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; img-src 'self' blob: data:; connect-src 'self'; frame-ancestors 'none'",
    );

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CONTENT_SECURITY_POLICY,
            csp_value,
        ));

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// Start the server with custom configuration
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
    app_config: AppConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        warn!("No API keys configured (FEELWRITE_API_KEYS); every request will be rejected");
    }

    let ai = AIClient::from_env();
    check_ai_connection(ai.as_ref()).await;

    let app = create_router_with_options(db, static_dir, config, app_config, ai);
    let addr = format!("{}:{}", host, port);

    info!("Starting server at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Check and log AI backend connection status
async fn check_ai_connection(ai: Option<&AIClient>) {
    match ai {
        Some(client) => {
            if client.health_check().await {
                info!(host = %client.host(), model = %client.model(), "AI backend connected");
            } else {
                warn!(
                    host = %client.host(),
                    model = %client.model(),
                    "AI backend configured but not responding; insights will use templates"
                );
            }
        }
        None => {
            info!("AI backend not configured; insights will use templates");
        }
    }
}

// ============================================================================
// Error Handling
// ============================================================================

/// Application error type with proper HTTP status codes
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn internal(msg: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn conflict(msg: &str) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn service_unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }

    /// Map a core error onto a status code
    ///
    /// `NotFound` → 404 and `InvalidData` → 400 carry their message; anything
    /// else is a generic 500 with the details kept for the log.
    pub fn from_core(err: feelwrite_core::Error) -> Self {
        match err {
            feelwrite_core::Error::NotFound(msg) => Self::not_found(&format!("Not found: {}", msg)),
            feelwrite_core::Error::InvalidData(msg) => Self::bad_request(&msg),
            other => Self::from(other),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let body = Json(serde_json::json!({
            "error": self.message
        }));

        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err = err.into();
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            // Generic message to the client, full error to the log
            message: "An internal error occurred".to_string(),
            internal: Some(err),
        }
    }
}

#[cfg(test)]
mod tests;

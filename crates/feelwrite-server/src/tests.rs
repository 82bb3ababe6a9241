//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use feelwrite_core::ai::MockBackend;
use feelwrite_core::db::Database;
use feelwrite_core::test_utils::MockCompletionServer;
use http_body_util::BodyExt;
use tower::ServiceExt;

fn open_config() -> ServerConfig {
    ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    }
}

fn setup_test_app() -> Router {
    setup_test_app_with_ai(Some(AIClient::mock()))
}

fn setup_test_app_with_ai(ai: Option<AIClient>) -> Router {
    let db = Database::in_memory().unwrap();
    create_router_with_options(db, None, open_config(), AppConfig::default(), ai)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn create_entry(app: &Router, user_id: &str, category: &str, sub_emotion: &str, text: &str) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/journal",
            serde_json::json!({
                "userId": user_id,
                "category": category,
                "subEmotion": sub_emotion,
                "text": text
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    get_body_json(response).await
}

// ========== Health ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["ai"]["model"], "mock");
}

#[tokio::test]
async fn test_health_without_ai() {
    let app = setup_test_app_with_ai(None);

    let response = app.oneshot(get("/api/health")).await.unwrap();
    let json = get_body_json(response).await;
    assert!(json["ai"].is_null());
}

#[tokio::test]
async fn test_security_headers() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.get("content-security-policy").is_some());
}

#[tokio::test]
async fn test_create_router_from_env() {
    let db = Database::in_memory().unwrap();
    let app = create_router(db, None, open_config());

    let response = app.oneshot(get("/api/emotions/categories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// ========== Journal ==========

#[tokio::test]
async fn test_create_and_get_entry() {
    let app = setup_test_app();

    let created = create_entry(&app, "u1", "happy", "joyful", "Sunny walk with a friend").await;
    assert_eq!(created["category"], "happy");
    // Stored under the canonical taxonomy name
    assert_eq!(created["subEmotion"], "Joyful");
    assert_eq!(created["reflections"].as_array().unwrap().len(), 0);

    let id = created["id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(get(&format!("/api/journal/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["text"], "Sunny walk with a friend");
    assert_eq!(json["userId"], "u1");
}

#[tokio::test]
async fn test_get_missing_entry_is_404() {
    let app = setup_test_app();

    let response = app.oneshot(get("/api/journal/does-not-exist")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().starts_with("Not found"));
}

#[tokio::test]
async fn test_create_entry_unknown_category() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/journal",
            serde_json::json!({
                "userId": "u1",
                "category": "bored",
                "subEmotion": "Joyful",
                "text": "hmm"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_entry_sub_emotion_from_other_category() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/journal",
            serde_json::json!({
                "userId": "u1",
                "category": "happy",
                "subEmotion": "Lonely",
                "text": "mixed"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_entry_malformed_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/journal")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_entries_paging() {
    let app = setup_test_app();

    for i in 0..3 {
        create_entry(&app, "u1", "calm", "Peaceful", &format!("entry {}", i)).await;
    }
    create_entry(&app, "u2", "sad", "Lonely", "someone else").await;

    let response = app.clone().oneshot(get("/api/journal")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 4);

    let response = app
        .clone()
        .oneshot(get("/api/journal?skip=1&limit=2"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(get("/api/journal/user/u1"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert!(entries.iter().all(|e| e["userId"] == "u1"));
}

#[tokio::test]
async fn test_append_reflection() {
    let app = setup_test_app();

    let created = create_entry(&app, "u1", "anxious", "Worried", "Big exam tomorrow").await;
    let id = created["id"].as_str().unwrap().to_string();

    for (prompt, reply) in [("What worries you?", "Failing"), ("What helps?", "Studying early")] {
        let response = app
            .clone()
            .oneshot(json_request(
                "PATCH",
                &format!("/api/journal/{}", id),
                serde_json::json!({ "prompt": prompt, "response": reply }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(get(&format!("/api/journal/{}", id)))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let reflections = json["reflections"].as_array().unwrap();
    assert_eq!(reflections.len(), 2);
    assert_eq!(reflections[0]["prompt"], "What worries you?");
    assert_eq!(reflections[1]["response"], "Studying early");
}

#[tokio::test]
async fn test_append_reflection_missing_entry() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/api/journal/nope",
            serde_json::json!({ "prompt": "p", "response": "r" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Weekly summary ==========

#[tokio::test]
async fn test_weekly_summary_with_ai() {
    let ai = MockBackend::new();
    let calls = ai.clone();
    let app = setup_test_app_with_ai(Some(AIClient::Mock(ai)));

    create_entry(&app, "u1", "happy", "Grateful", "Dinner with family").await;
    create_entry(&app, "u1", "happy", "Joyful", "Great run this morning").await;
    create_entry(&app, "u1", "sad", "Lonely", "Quiet evening alone").await;

    let response = app
        .clone()
        .oneshot(get("/api/journal/weekly-summary?user_id=u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["isAI"], true);
    assert_eq!(json["period"], "week");
    assert_eq!(json["moodChanges"].as_array().unwrap().len(), 3);

    let patterns = json["emotionalPatterns"].as_array().unwrap();
    assert_eq!(patterns[0]["emotion"], "happy");
    assert_eq!(patterns[0]["count"], 2);
    assert_eq!(patterns[1]["emotion"], "sad");
    assert_eq!(calls.calls(), 1);
}

#[tokio::test]
async fn test_weekly_summary_user_route_falls_back() {
    let app = setup_test_app_with_ai(Some(AIClient::Mock(MockBackend::failing())));

    create_entry(&app, "u1", "angry", "Frustrated", "Traffic again").await;

    let response = app
        .clone()
        .oneshot(get("/api/user/weekly-summary?user_id=u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["isAI"], false);
    let insight = json["personalizedInsights"].as_str().unwrap();
    assert!(insight.contains("angry"));
}

#[tokio::test]
async fn test_weekly_summary_empty_window_skips_model() {
    let ai = MockBackend::new();
    let calls = ai.clone();
    let app = setup_test_app_with_ai(Some(AIClient::Mock(ai)));

    let response = app
        .oneshot(get("/api/journal/weekly-summary?user_id=nobody"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["isAI"], false);
    assert!(json["emotionalPatterns"].as_array().unwrap().is_empty());
    assert!(!json["personalizedInsights"].as_str().unwrap().is_empty());
    assert_eq!(calls.calls(), 0);
}

#[tokio::test]
async fn test_weekly_summary_requires_user_id() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/journal/weekly-summary"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/journal/weekly-summary?user_id=%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_weekly_summary_over_openai_protocol() {
    let server = MockCompletionServer::start_with_reply("Steady week, keep it up.").await;
    let ai = AIClient::openai_compatible(&server.url(), "test-model", None);
    let app = setup_test_app_with_ai(Some(ai));

    create_entry(&app, "u1", "calm", "Relaxed", "Long bath and a book").await;

    let response = app
        .oneshot(get("/api/user/weekly-summary?user_id=u1"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["isAI"], true);
    assert_eq!(json["personalizedInsights"], "Steady week, keep it up.");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["model"], "test-model");
}

// ========== Streak & stats ==========

#[tokio::test]
async fn test_streak_and_stats() {
    let app = setup_test_app();

    create_entry(&app, "u1", "happy", "Proud", "Finished the project").await;
    create_entry(&app, "u1", "happy", "Proud", "Shipped it").await;

    let response = app
        .clone()
        .oneshot(get("/api/user/streak?user_id=u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["currentStreak"], 1);
    assert_eq!(json["longestStreak"], 1);

    let response = app
        .clone()
        .oneshot(get("/api/user/stats?user_id=u1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["totalEntries"], 2);
    assert_eq!(json["emotions"].as_array().unwrap().len(), 5);
    assert_eq!(json["subEmotions"][0]["name"], "Proud");
    assert_eq!(json["subEmotions"][0]["count"], 2);
}

// ========== Taxonomy & prompts ==========

#[tokio::test]
async fn test_list_categories_and_sub_emotions() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/emotions/categories"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 5);

    let response = app
        .clone()
        .oneshot(get("/api/emotions/sub-emotions?category=sad"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let subs = json.as_array().unwrap();
    assert!(!subs.is_empty());
    assert!(subs.iter().all(|s| s["category"] == "sad"));

    let response = app
        .oneshot(get("/api/emotions/sub-emotions?category=meh"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_prompts() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(get("/api/prompts?category=calm"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    let prompts = json.as_array().unwrap();
    assert!(!prompts.is_empty());
    assert!(prompts.iter().all(|p| p["category"] == "calm"));

    // Defaults to the anxious category
    let response = app.clone().oneshot(get("/api/prompts/random")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "anxious");

    let response = app
        .oneshot(get("/api/prompts/random?category=happy"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["category"], "happy");
}

// ========== Users ==========

#[tokio::test]
async fn test_user_lifecycle() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({
                "email": "sam@example.com",
                "username": "sam",
                "password": "hunter22"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let user = get_body_json(response).await;
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password").is_none());
    let id = user["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/users/{}", id),
            serde_json::json!({ "username": "samuel" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["username"], "samuel");
    assert_eq!(json["email"], "sam@example.com");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/users/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);

    let response = app
        .oneshot(get(&format!("/api/users/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_duplicate_user_rejected() {
    let app = setup_test_app();
    let body = serde_json::json!({
        "email": "ana@example.com",
        "username": "ana",
        "password": "pw"
    });

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/users", body.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(json_request("POST", "/api/users", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Companion ==========

#[tokio::test]
async fn test_completion() {
    let app = setup_test_app_with_ai(Some(AIClient::Mock(MockBackend::with_reply("I'm here for you."))));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/completion",
            serde_json::json!({
                "messages": [{ "role": "user", "content": "Rough day." }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["message"], "I'm here for you.");
}

#[tokio::test]
async fn test_completion_empty_messages() {
    let app = setup_test_app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/completion",
            serde_json::json!({ "messages": [] }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Messages array is required");
}

#[tokio::test]
async fn test_completion_without_backend() {
    let app = setup_test_app_with_ai(None);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/completion",
            serde_json::json!({
                "messages": [{ "role": "user", "content": "Hello" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_completion_backend_failure() {
    let app = setup_test_app_with_ai(Some(AIClient::Mock(MockBackend::failing())));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/completion",
            serde_json::json!({
                "messages": [{ "role": "user", "content": "Hello" }]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Failed to generate response");
}

// ========== Audit ==========

#[tokio::test]
async fn test_writes_are_audited() {
    let app = setup_test_app();

    let created = create_entry(&app, "u1", "happy", "Hopeful", "New job offer").await;

    let response = app.oneshot(get("/api/audit?limit=10")).await.unwrap();
    let json = get_body_json(response).await;
    let log = json.as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["action"], "create");
    assert_eq!(log[0]["entity_type"], "journal_entry");
    assert_eq!(log[0]["entity_id"], created["id"]);
    assert_eq!(log[0]["user_email"], "local-dev");
}

// ========== Auth ==========

fn setup_auth_app() -> Router {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        api_keys: vec!["s3cret-key".to_string()],
    };
    create_router_with_options(db, None, config, AppConfig::default(), Some(AIClient::mock()))
}

#[tokio::test]
async fn test_auth_required() {
    let app = setup_auth_app();

    let response = app.oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_wrong_key() {
    let app = setup_auth_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("authorization", "Bearer nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_valid_key_audits_as_api_key() {
    let app = setup_auth_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header("authorization", "Bearer s3cret-key")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "email": "kai@example.com",
                        "username": "kai",
                        "password": "pw"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/audit")
                .header("authorization", "Bearer s3cret-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json[0]["user_email"], "api-key");
}

#[test]
fn test_validate_api_key() {
    let keys = vec!["abc".to_string(), "longer-key".to_string()];
    assert!(validate_api_key("abc", &keys));
    assert!(validate_api_key("longer-key", &keys));
    assert!(!validate_api_key("ab", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("abc", &[]));
}

#[test]
fn test_split_list() {
    assert_eq!(
        split_list(Some(" a, b ,,c ".to_string())),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
    assert!(split_list(None).is_empty());
}

#[test]
fn test_app_error_mapping() {
    let err = AppError::from_core(feelwrite_core::Error::NotFound("entry x".into()));
    assert_eq!(err.status(), StatusCode::NOT_FOUND);

    let err = AppError::from_core(feelwrite_core::Error::InvalidData("bad".into()));
    assert_eq!(err.status(), StatusCode::BAD_REQUEST);

    let err = AppError::from(anyhow::anyhow!("boom"));
    assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

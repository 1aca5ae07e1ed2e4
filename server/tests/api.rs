//! Router-level API tests: scenario endpoints, the login gate, and the
//! SPA fallback, driven through `tower::ServiceExt::oneshot` against a
//! throwaway content tree.

use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Request, StatusCode};
use playbill_server::{ServerConfig, router};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tower::ServiceExt;

const CLAIMS_DOC: &str = r##"{
  "meta": { "title": "Claims walkthrough" },
  "actors": [{ "id": "customer", "name": "Pat Doe", "color": "#3b82f6" }],
  "phases": [{ "id": "report", "name": "Report", "description": "The loss is reported" }],
  "timeline": [
    { "step": 1, "phase": "report", "chat": { "actor": "customer", "message": "Hello" } }
  ]
}"##;

const INDEX_DOC: &str = r#"{
  "scenarios": [{ "id": "claims", "title": "Claims walkthrough" }]
}"#;

fn content_tree() -> TempDir {
    let dir = TempDir::new().unwrap();
    let scenarios = dir.path().join("scenarios");
    let public = dir.path().join("public");
    std::fs::create_dir_all(&scenarios).unwrap();
    std::fs::create_dir_all(&public).unwrap();
    std::fs::write(scenarios.join("index.json"), INDEX_DOC).unwrap();
    std::fs::write(scenarios.join("claims.json"), CLAIMS_DOC).unwrap();
    std::fs::write(scenarios.join("broken.json"), "{ not json").unwrap();
    std::fs::write(public.join("index.html"), "<h1>playbill</h1>").unwrap();
    std::fs::write(public.join("login.html"), "<h1>login</h1>").unwrap();
    dir
}

fn open_router(dir: &TempDir) -> Router {
    router(ServerConfig {
        content_dir: dir.path().to_path_buf(),
        ..ServerConfig::default()
    })
}

fn gated_router(dir: &TempDir) -> Router {
    router(ServerConfig {
        content_dir: dir.path().to_path_buf(),
        access_codes: vec!["open-sesame".to_string()],
        session_ttl: Duration::from_secs(60),
        ..ServerConfig::default()
    })
}

fn get(path: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

fn get_with_cookie(path: &str, cookie: &str) -> Request<Body> {
    Request::builder()
        .uri(path)
        .header(COOKIE, cookie)
        .body(Body::empty())
        .unwrap()
}

fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Log in and return the session cookie pair (`name=value`).
async fn log_in(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/api/login", r#"{"accessCode":"open-sesame"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();
    cookie.split(';').next().unwrap().to_string()
}

#[tokio::test]
async fn index_lists_available_scenarios() {
    let dir = content_tree();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["scenarios"][0]["id"], "claims");
}

#[tokio::test]
async fn scenario_document_is_served_verbatim() {
    let dir = content_tree();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios/claims"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["meta"]["title"], "Claims walkthrough");
    assert_eq!(json["timeline"][0]["chat"]["message"], "Hello");
}

#[tokio::test]
async fn missing_scenario_is_404_with_error_body() {
    let dir = content_tree();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios/unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Scenario not found");
}

#[tokio::test]
async fn hostile_scenario_id_never_reaches_the_filesystem() {
    let dir = content_tree();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios/claims.json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_scenario_file_is_500() {
    let dir = content_tree();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios/broken"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Scenario file is invalid");
}

#[tokio::test]
async fn missing_index_is_500() {
    let dir = content_tree();
    std::fs::remove_file(dir.path().join("scenarios/index.json")).unwrap();
    let response = open_router(&dir)
        .oneshot(get("/api/scenarios"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Failed to load scenarios");
}

#[tokio::test]
async fn allow_listed_code_logs_in_and_sets_cookie() {
    let dir = content_tree();
    let app = gated_router(&dir);
    let response = app
        .clone()
        .oneshot(post_json("/api/login", r#"{"accessCode":"open-sesame"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(SET_COOKIE));
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["redirectUrl"], "/");
}

#[tokio::test]
async fn wrong_code_is_refused_without_cookie() {
    let dir = content_tree();
    let response = gated_router(&dir)
        .oneshot(post_json("/api/login", r#"{"accessCode":"guess"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!response.headers().contains_key(SET_COOKIE));
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn gated_api_requires_a_session() {
    let dir = content_tree();
    let app = gated_router(&dir);

    let response = app.clone().oneshot(get("/api/scenarios")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = log_in(&app).await;
    let response = app
        .oneshot(get_with_cookie("/api/scenarios", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn gated_pages_redirect_to_login() {
    let dir = content_tree();
    let app = gated_router(&dir);
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login.html");
}

#[tokio::test]
async fn login_page_is_reachable_without_a_session() {
    let dir = content_tree();
    let response = gated_router(&dir).oneshot(get("/login.html")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let dir = content_tree();
    let app = gated_router(&dir);
    let cookie = log_in(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/logout")
                .header(COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["redirectUrl"], "/login.html");

    let response = app
        .oneshot(get_with_cookie("/api/scenarios", &cookie))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unmatched_routes_fall_back_to_the_main_page() {
    let dir = content_tree();
    let app = open_router(&dir);
    let response = app.oneshot(get("/some/deep/route")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), "<h1>playbill</h1>");
}

#[tokio::test]
async fn open_mode_skips_the_gate_entirely() {
    let dir = content_tree();
    let app = open_router(&dir);
    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Login still answers success so the page flow works either way.
    let response = app
        .oneshot(post_json("/api/login", r#"{"accessCode":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
}

//! Route handlers for the scenario API and the login gate.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use playbill_protocol::{LoginRequest, LoginResponse, LogoutResponse, Scenario, ScenarioIndex};

use crate::AppState;
use crate::error::ApiError;
use crate::session::{clear_cookie, set_cookie, token_from_cookies};

/// Scenario ids are file stems; anything outside this charset is
/// answered 404 without ever touching the filesystem.
fn valid_scenario_id(id: &str) -> bool {
    !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// `GET /api/scenarios` — the scenario catalogue from `index.json`.
pub async fn list_scenarios(
    State(state): State<AppState>,
) -> Result<Json<ScenarioIndex>, ApiError> {
    let path = state.config.scenarios_dir().join("index.json");
    let raw = tokio::fs::read_to_string(&path).await.map_err(|err| {
        tracing::error!(path = %path.display(), "error reading scenario index: {err}");
        ApiError::Internal("Failed to load scenarios".to_string())
    })?;
    let index: ScenarioIndex = serde_json::from_str(&raw).map_err(|err| {
        tracing::error!(path = %path.display(), "scenario index is not valid JSON: {err}");
        ApiError::Internal("Failed to load scenarios".to_string())
    })?;
    Ok(Json(index))
}

/// `GET /api/scenarios/:id` — one scenario document, served verbatim
/// after a structural check.
pub async fn get_scenario(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !valid_scenario_id(&id) {
        return Err(ApiError::NotFound("Scenario not found".to_string()));
    }
    let path = state.config.scenarios_dir().join(format!("{id}.json"));
    let raw = tokio::fs::read_to_string(&path).await.map_err(|err| {
        tracing::warn!(scenario = %id, "error reading scenario: {err}");
        ApiError::NotFound("Scenario not found".to_string())
    })?;

    // Parse into the document model to reject malformed or dangling
    // content, but answer with the raw JSON so authored fields survive
    // byte-for-byte.
    let scenario: Scenario = serde_json::from_str(&raw).map_err(|err| {
        tracing::error!(scenario = %id, "scenario is not a valid document: {err}");
        ApiError::Internal("Scenario file is invalid".to_string())
    })?;
    if let Err(err) = scenario.validate() {
        tracing::error!(scenario = %id, "scenario failed validation: {err}");
        return Err(ApiError::Internal("Scenario file is invalid".to_string()));
    }

    let value = serde_json::from_str(&raw)
        .map_err(|_| ApiError::Internal("Scenario file is invalid".to_string()))?;
    Ok(Json(value))
}

/// `POST /api/login` — allow-list check; success installs a session
/// cookie.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    if state.config.gate_enabled() && !state.config.code_allowed(&request.access_code) {
        tracing::warn!("login attempt with invalid access code");
        return (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse {
                success: false,
                message: "Invalid access code".to_string(),
                redirect_url: None,
            }),
        )
            .into_response();
    }

    let token = state.sessions.create();
    tracing::info!("login accepted, session created");
    let mut response = Json(LoginResponse {
        success: true,
        message: "Access granted".to_string(),
        redirect_url: Some("/".to_string()),
    })
    .into_response();
    if let Ok(value) = HeaderValue::from_str(&set_cookie(&token, state.config.session_ttl)) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

/// `POST /api/logout` — destroy the session and clear the cookie.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let cookie_header = headers.get(COOKIE).and_then(|v| v.to_str().ok());
    if let Some(token) = token_from_cookies(cookie_header) {
        state.sessions.remove(token);
        tracing::info!("session destroyed");
    }
    let mut response = Json(LogoutResponse {
        success: true,
        redirect_url: "/login.html".to_string(),
    })
    .into_response();
    if let Ok(value) = HeaderValue::from_str(&clear_cookie()) {
        response.headers_mut().insert(SET_COOKIE, value);
    }
    response
}

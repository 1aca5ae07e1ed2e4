//! `playbill-server` — the content server.
//!
//! Serves the scenario JSON API, the login/logout gate, and the static
//! demo pages, with unmatched routes falling back to `index.html`.
//! Requests are stateless apart from the in-memory session store; the
//! only shared mutable state is the authenticated-token map.

pub mod config;
pub mod error;
pub mod handlers;
pub mod session;

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
use error::ApiError;
use session::{SessionStore, token_from_cookies};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub sessions: SessionStore,
}

/// Paths reachable without a session: the login page and the login API
/// itself (logout included so a half-dead session can always reset).
fn gate_exempt(path: &str) -> bool {
    matches!(path, "/login.html" | "/api/login" | "/api/logout")
}

/// Session gate applied to every route. API requests without a live
/// session get a 401 JSON body; page requests are redirected to the
/// login page. Disabled entirely when the allow-list is empty.
async fn session_gate(State(state): State<AppState>, request: Request, next: Next) -> Response {
    if !state.config.gate_enabled() || gate_exempt(request.uri().path()) {
        return next.run(request).await;
    }

    let cookie_header = request
        .headers()
        .get(COOKIE)
        .and_then(|v| v.to_str().ok());
    let authenticated =
        token_from_cookies(cookie_header).is_some_and(|token| state.sessions.validate(token));
    if authenticated {
        return next.run(request).await;
    }

    if request.uri().path().starts_with("/api/") {
        ApiError::Unauthorized("Not logged in".to_string()).into_response()
    } else {
        Redirect::to("/login.html").into_response()
    }
}

/// Build the application router for a configuration.
pub fn router(config: ServerConfig) -> Router {
    let state = AppState {
        sessions: SessionStore::new(config.session_ttl),
        config: Arc::new(config),
    };

    let public_dir = state.config.public_dir();
    let index_file = public_dir.join("index.html");
    // Unmatched routes serve the main page with a 200 (SPA behavior).
    let static_service = ServeDir::new(public_dir).fallback(ServeFile::new(index_file));

    Router::new()
        .route("/api/scenarios", get(handlers::list_scenarios))
        .route("/api/scenarios/:id", get(handlers::get_scenario))
        .route("/api/login", post(handlers::login))
        .route("/api/logout", post(handlers::logout))
        .fallback_service(static_service)
        .layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until ctrl-c.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let bind = config.bind;
    let gated = config.gate_enabled();
    let content = config.content_dir.clone();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!(
        addr = %bind,
        content_dir = %content.display(),
        gate = gated,
        "content server listening"
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutdown signal received");
        })
        .await?;
    Ok(())
}

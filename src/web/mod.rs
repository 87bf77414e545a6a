// Web server: Axum JSON API in front of the verification pipeline.
//
// /api/verify and /api/history sit behind the bearer-token middleware.
// /health and / are public.
//
// Auth: stateless HMAC-SHA256 bearer tokens. No session table in the DB.

use std::sync::Arc;

use anyhow::Result;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::Config;
use crate::db::HistoryStore;
use crate::pipeline::Verifier;

pub mod auth;
pub mod handlers;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<Verifier>,
    pub history: Arc<dyn HistoryStore>,
    pub config: Arc<Config>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(
    config: Config,
    verifier: Arc<Verifier>,
    history: Arc<dyn HistoryStore>,
    port: u16,
    bind: &str,
) -> Result<()> {
    if config.token_secret.is_empty() {
        info!("CEKVIRAL_TOKEN_SECRET not set; API requests are anonymous");
    }

    let state = AppState {
        verifier,
        history,
        config: Arc::new(config),
    };

    let app = build_router(state);

    let addr = format!("{bind}:{port}");
    info!("CekViral API listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let protected_api = Router::new()
        .route("/api/verify", post(handlers::verify::verify_content))
        .route("/api/history", get(handlers::history::recent_history))
        .route(
            "/api/history/{id}",
            delete(handlers::history::delete_history),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ));

    let public_api = Router::new()
        .route("/", get(root))
        .route("/health", get(health));

    Router::new()
        .merge(protected_api)
        .merge(public_api)
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::DELETE,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check: always 200, plus whether the classifier is loaded.
async fn health(axum::extract::State(state): axum::extract::State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        axum::Json(serde_json::json!({
            "status": "ok",
            "model_loaded": state.verifier.engine().is_ready(),
        })),
    )
}

async fn root() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "name": "CekViral",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Selamat datang di API CekViral.",
    }))
}

/// Typed JSON error response helper.
pub fn api_error(status: StatusCode, message: &str) -> Response {
    (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
}

/// Caller identity, inserted into request extensions by `require_auth`.
/// `None` when authentication is disabled.
#[derive(Debug, Clone, Default)]
pub struct AuthUser(pub Option<String>);

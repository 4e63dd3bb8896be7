//! Axum HTTP server for the quiz.
//!
//! The session engine lives in an `Arc<AppContext>` shared across handlers.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check with active session count |
//! | POST | `/start` | Start a session, returns the first question |
//! | POST | `/answer` | Submit a rating, returns the next question or the result |

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use psyche_core::engine::SessionEngine;
use psyche_core::model::check_rating;

use crate::api::{AnswerRequest, AnswerResponse, HealthResponse, StartResponse};
use crate::config::ServerConfig;
use crate::sweeper::spawn_sweeper;

/// Shared state for all handlers.
#[derive(Debug)]
pub struct AppContext {
    pub engine: Arc<SessionEngine>,
    pub config: ServerConfig,
}

impl AppContext {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            engine: Arc::new(SessionEngine::new()),
            config,
        }
    }
}

pub type AppState = Arc<AppContext>;

pub fn create_router(ctx: AppState) -> Router {
    let cors = cors_layer(&ctx.config);

    Router::new()
        .route("/health", get(handle_health_check))
        .route("/start", post(handle_start))
        .route("/answer", post(handle_answer))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origin = if config.allows_any_origin() {
        AllowOrigin::from(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| match HeaderValue::from_str(o) {
                Ok(v) => Some(v),
                Err(_) => {
                    tracing::warn!("ignoring invalid CORS origin '{o}'");
                    None
                }
            })
            .collect();
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

// ── Handlers ────────────────────────────────────────────────────────

async fn handle_health_check(State(ctx): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        active_sessions: ctx.engine.active_sessions(),
    })
}

async fn handle_start(State(ctx): State<AppState>) -> Json<StartResponse> {
    Json(ctx.engine.start_session())
}

async fn handle_answer(
    State(ctx): State<AppState>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> (StatusCode, Json<AnswerResponse>) {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            tracing::debug!("rejected answer body: {}", rejection.body_text());
            return (
                rejection.status(),
                Json(AnswerResponse::error(rejection.body_text())),
            );
        }
    };
    let Some(session_id) = req.session_id else {
        return invalid_session();
    };
    let Some(value) = req.value else {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(AnswerResponse::error("A numeric rating is required.")),
        );
    };
    if ctx.config.strict_ratings {
        if let Err(e) = check_rating(value) {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(AnswerResponse::error(e.to_string())),
            );
        }
    }

    match ctx.engine.submit_answer(&session_id, value) {
        Ok(outcome) => (StatusCode::OK, Json(outcome.into())),
        Err(_) => invalid_session(),
    }
}

/// Unknown session: an `{error}` body with status 200.
fn invalid_session() -> (StatusCode, Json<AnswerResponse>) {
    (
        StatusCode::OK,
        Json(AnswerResponse::error(
            psyche_core::SessionError::InvalidSession.to_string(),
        )),
    )
}

// ── Serving ─────────────────────────────────────────────────────────

/// Bind to the configured address and serve until Ctrl+C.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("psyche server listening on {addr}");

    serve_on(listener, Arc::new(AppContext::new(config)), shutdown_signal()).await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Serve on an already-bound listener until `shutdown` resolves.
///
/// Starts the session expiry sweeper when a TTL is configured and stops it
/// once the server has drained.
pub async fn serve_on(
    listener: TcpListener,
    ctx: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let sweeper = ctx.config.session_ttl().map(|ttl| {
        spawn_sweeper(Arc::clone(&ctx.engine), ttl, ctx.config.sweep_interval())
    });

    let app = create_router(ctx);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error");

    if let Some(handle) = sweeper {
        handle.abort();
    }
    result
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}

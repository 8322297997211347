//! Route definitions for the action's HTTP surface.
//!
//! The page is served at `/`, its assets under `/static`, and the JSON
//! endpoints under `/api`.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router and thread `AppState` through every route.
pub fn build_router(state: AppState) -> Router {
    let static_dir = ServeDir::new(&state.config.server.static_dir);

    Router::new()
        .route("/", get(handlers::index::index))
        .nest("/api", action_routes().merge(health_routes()))
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(middleware::logging::request_logging))
        .with_state(state)
}

/// Prepare/submit endpoints
fn action_routes() -> Router<AppState> {
    Router::new()
        .route("/prepare-action", post(handlers::action::prepare_action))
        .route("/submit-version", post(handlers::action::submit_version))
}

/// Health check endpoint
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

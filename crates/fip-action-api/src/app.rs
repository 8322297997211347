//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;

use axum::Router;

use fip_action_core::config::{AppConfig, CorsConfig};
use fip_action_core::error::{AppError, ErrorKind};
use fip_action_service::SubmissionOrchestrator;
use fip_action_wizard::{HttpNanopubSource, WizardClientConfig, WizardClientFactory};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state).layer(build_cors_layer(cors_config))
}

/// Builds state backed by the real FAIR Wizard and nanopublication clients.
pub fn build_state(config: AppConfig, index_template: &str) -> Result<AppState, AppError> {
    let wizard = WizardClientFactory::new(WizardClientConfig::from(&config.wizard));
    let nanopubs = HttpNanopubSource::new(
        config.wizard.request_timeout(),
        &config.wizard.user_agent,
    )?;
    let orchestrator = SubmissionOrchestrator::new(
        Arc::new(wizard),
        Arc::new(nanopubs),
        config.wizard.publish_mode,
    );

    Ok(AppState::new(
        Arc::new(config),
        Arc::new(orchestrator),
        index_template,
    ))
}

/// Runs the action server until Ctrl+C.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting FIP version action...");

    let template_path = config.server.template_path.clone();
    let template = tokio::fs::read_to_string(&template_path)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Failed to read page template '{template_path}': {e}"),
                e,
            )
        })?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        api_url = %config.wizard.normalized_api_url(),
        mode = ?config.wizard.publish_mode,
        root_path = %config.server.normalized_root_path(),
        "FAIR Wizard connection configured"
    );

    let cors = config.server.cors.clone();
    let state = build_state(config, &template)?;
    let app = build_app(state, &cors);

    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Configuration,
            format!("Failed to bind {addr}: {e}"),
            e,
        )
    })?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Internal, format!("Server error: {e}"), e))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

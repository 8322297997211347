//! Application state shared across all handlers.

use std::sync::Arc;

use fip_action_core::config::AppConfig;
use fip_action_service::SubmissionOrchestrator;

/// Application state passed to every Axum handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks. Nothing in
/// here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Prepare/submit workflows
    pub orchestrator: Arc<SubmissionOrchestrator>,
    /// Rendered action page
    pub index_html: Arc<str>,
}

impl AppState {
    /// Build state from its parts, rendering the page template once.
    pub fn new(
        config: Arc<AppConfig>,
        orchestrator: Arc<SubmissionOrchestrator>,
        index_template: &str,
    ) -> Self {
        let index_html = crate::handlers::index::render_index(
            index_template,
            config.server.normalized_root_path(),
        );
        Self {
            config,
            orchestrator,
            index_html: Arc::from(index_html),
        }
    }
}

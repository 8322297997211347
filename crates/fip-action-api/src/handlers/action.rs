//! Prepare and submit handlers.
//!
//! Workflow failures come back as `ok=false` bodies with status 200; only
//! malformed requests are rejected with an HTTP error.

use axum::Json;
use axum::extract::State;

use fip_action_core::types::{PrepareResult, VersionSubmitResult};

use crate::dto::request::{PrepareActionRequest, SubmitVersionRequest};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/prepare-action
pub async fn prepare_action(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<PrepareActionRequest>,
) -> Json<PrepareResult> {
    let result = state.orchestrator.prepare_action(&req.into()).await;
    Json(result)
}

/// POST /api/submit-version
pub async fn submit_version(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SubmitVersionRequest>,
) -> Json<VersionSubmitResult> {
    let result = state.orchestrator.submit_version(&req.into()).await;
    Json(result)
}

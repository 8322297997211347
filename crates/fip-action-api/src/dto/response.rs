//! Response DTOs.
//!
//! The prepare/submit endpoints answer with
//! [`PrepareResult`](fip_action_core::types::PrepareResult) and
//! [`VersionSubmitResult`](fip_action_core::types::VersionSubmitResult)
//! directly.

use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status string.
    pub status: String,
    /// Server version.
    pub version: String,
}

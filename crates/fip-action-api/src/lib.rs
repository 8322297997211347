//! # fip-action-api
//!
//! HTTP front end for the FIP version action built on Axum.
//!
//! Serves the action page and its static assets, validates the
//! prepare/submit request bodies, and hands them to the
//! [`SubmissionOrchestrator`](fip_action_service::SubmissionOrchestrator).

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;

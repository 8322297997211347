//! # fip-action-core
//!
//! Core crate for the FIP version action. Contains the configuration
//! schemas, the FAIR Wizard wire models, the prepare/submit result types,
//! the seams the orchestrator talks through, and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

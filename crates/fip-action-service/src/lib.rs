//! # fip-action-service
//!
//! The submission orchestrator. It sequences the FAIR Wizard client, the
//! realtime channel, and the RDF extractor into the two action workflows:
//! a read-only *prepare* summary and the versioned *submit*.

pub mod orchestrator;
pub mod stage;

pub use orchestrator::SubmissionOrchestrator;
pub use stage::SubmitStage;

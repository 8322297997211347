//! # fip-action-wizard
//!
//! Clients for the remote side of the action:
//!
//! - [`client::WizardClient`]: authenticated FAIR Wizard REST calls and
//!   document polling.
//! - [`realtime`]: the short-lived socket session that sets the version
//!   reply and yields the correlating event UUID.
//! - [`nanopub::HttpNanopubSource`]: dereferences published
//!   nanopublications as TriG.

pub mod client;
pub mod nanopub;
pub mod realtime;

pub use client::{WizardClient, WizardClientConfig, WizardClientFactory};
pub use nanopub::HttpNanopubSource;

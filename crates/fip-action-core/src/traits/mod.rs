//! Seams defined in `fip-action-core` and implemented by other crates.

pub mod nanopub;
pub mod wizard;

pub use nanopub::NanopubSource;
pub use wizard::{WizardApi, WizardApiFactory};

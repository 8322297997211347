//! Source of published nanopublications.

use async_trait::async_trait;

use crate::result::AppResult;

/// Dereferences submission locations into TriG content.
///
/// Implemented over HTTP in `fip-action-wizard`.
#[async_trait]
pub trait NanopubSource: Send + Sync + 'static {
    /// Fetch the nanopublication at `uri` as TriG text.
    async fn fetch_nanopub(&self, uri: &str) -> AppResult<String>;
}

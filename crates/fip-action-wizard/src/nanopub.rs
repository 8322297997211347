//! HTTP nanopublication fetcher.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use tracing::debug;

use fip_action_core::error::{AppError, ErrorKind};
use fip_action_core::result::AppResult;
use fip_action_core::traits::NanopubSource;

/// Media type requested from nanopublication servers.
pub const TRIG_MEDIA_TYPE: &str = "application/trig";

/// Fetches nanopublications over plain HTTP, following redirects.
///
/// Unauthenticated: submission locations are public and must not receive the
/// user's FAIR Wizard token.
#[derive(Debug, Clone)]
pub struct HttpNanopubSource {
    http: reqwest::Client,
}

impl HttpNanopubSource {
    /// Create a fetcher with the given per-call timeout and `User-Agent`.
    pub fn new(timeout: Duration, user_agent: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to create HTTP client: {e}"),
                    e,
                )
            })?;
        Ok(Self { http })
    }
}

#[async_trait]
impl NanopubSource for HttpNanopubSource {
    async fn fetch_nanopub(&self, uri: &str) -> AppResult<String> {
        debug!(uri = %uri, "Fetching nanopublication");
        let transport = |e: reqwest::Error| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("GET {uri} failed: {e}"),
                e,
            )
        };

        self.http
            .get(uri)
            .header(ACCEPT, TRIG_MEDIA_TYPE)
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?
            .text()
            .await
            .map_err(transport)
    }
}

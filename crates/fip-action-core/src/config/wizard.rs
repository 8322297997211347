//! FAIR Wizard API and workflow configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Selects how much of the submit workflow runs after the version record is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Set the version reply and create the version record, nothing more.
    MutateOnly,
    /// Additionally generate the nanopublication document and submit it.
    #[default]
    MutateAndPublish,
}

/// FAIR Wizard connection and workflow settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Base URL of the FAIR Wizard REST API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// `User-Agent` sent on every outgoing request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-call transport timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
    /// Delay between document state polls in milliseconds.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Page size for template suggestions and document polling.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Submission service the generated document is sent to.
    #[serde(default = "default_submission_service_id")]
    pub submission_service_id: String,
    /// Submit workflow variant.
    #[serde(default)]
    pub publish_mode: PublishMode,
}

impl WizardConfig {
    /// The API URL with any trailing `/` removed.
    pub fn normalized_api_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    /// Per-call transport timeout.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Delay between document state polls.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            user_agent: default_user_agent(),
            request_timeout_seconds: default_request_timeout(),
            poll_interval_ms: default_poll_interval(),
            page_size: default_page_size(),
            submission_service_id: default_submission_service_id(),
            publish_mode: PublishMode::default(),
        }
    }
}

fn default_api_url() -> String {
    "https://fip.preview.fair-wizard.com/wizard-api".to_string()
}

fn default_user_agent() -> String {
    "fip-version-project-action/0.1.0".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

fn default_poll_interval() -> u64 {
    5000
}

fn default_page_size() -> u32 {
    20
}

fn default_submission_service_id() -> String {
    "nanopub-test".to_string()
}

//! Request and result types of the prepare and submit workflows.
//!
//! These serialize with the camelCase field names the action page expects.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::version::VersionSuggestions;

/// Caller identity for a project-scoped action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    /// Project the action was opened from.
    pub project_uuid: String,
    /// FAIR Wizard token of the user running the action.
    pub user_token: String,
}

/// A request to publish a new FIP version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRequest {
    /// Project the action was opened from.
    pub project_uuid: String,
    /// FAIR Wizard token of the user running the action.
    pub user_token: String,
    /// Target version, `MAJOR.MINOR.PATCH`.
    pub version: String,
    /// Version description stored on the version record.
    pub description: String,
}

/// A previously submitted FIP nanopublication.
///
/// `version` is `None` when the nanopublication could not be fetched or did
/// not contain a FIP version. That means "unknown", not "no version".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedVersion {
    /// Published location of the nanopublication.
    pub uri: String,
    /// FIP version read from the nanopublication.
    pub version: Option<String>,
    /// When the submission was made.
    pub submitted_at: Option<String>,
}

/// Result of the prepare workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrepareResult {
    /// Whether the summary could be built.
    pub ok: bool,
    /// Status or failure message.
    pub message: String,
    /// Version currently set in the questionnaire.
    pub questionnaire_version: Option<String>,
    /// Completed submissions in document list order.
    pub submitted_versions: Vec<SubmittedVersion>,
    /// Highest resolved submitted version.
    pub latest_version: Option<String>,
    /// Next-version suggestions.
    pub suggestions: Option<VersionSuggestions>,
    /// Raw questionnaire payload.
    pub debug: Option<Value>,
}

impl PrepareResult {
    /// A failed prepare carrying only a message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            questionnaire_version: None,
            submitted_versions: Vec::new(),
            latest_version: None,
            suggestions: None,
            debug: None,
        }
    }
}

/// Result of the submit workflow.
///
/// Fields stay at their "not reached" defaults until the corresponding step
/// completes, so a failed result still reports how far the workflow got.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionSubmitResult {
    /// Whether the workflow finished without an error.
    pub ok: bool,
    /// Status or failure message.
    pub message: String,
    /// Whether the nanopublication document was generated.
    pub document_done: bool,
    /// Generated document UUID.
    pub document_uuid: Option<String>,
    /// Whether the submission service accepted the document.
    pub submission_done: bool,
    /// Submission UUID.
    pub submission_uuid: Option<String>,
    /// Published location of the submission.
    pub submission_location: Option<String>,
}

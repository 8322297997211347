//! FAIR Wizard API seam used by the submission orchestrator.

use async_trait::async_trait;
use serde_json::Value;

use crate::result::AppResult;
use crate::types::wizard::{Document, DocumentPage, ProjectInfo, Submission};

/// Authenticated operations against one FAIR Wizard instance on behalf of one user.
///
/// The [`WizardApi`] trait is defined here in `fip-action-core` and
/// implemented by `WizardClient` in `fip-action-wizard`. Implementations
/// never retry; every failure is reported as an `AppError`.
#[async_trait]
pub trait WizardApi: Send + Sync {
    /// Fetch the raw questionnaire of a project.
    async fn fetch_questionnaire(&self, project_uuid: &str) -> AppResult<Value>;

    /// Fetch the documents of a project, including their submissions.
    async fn fetch_documents(&self, project_uuid: &str) -> AppResult<DocumentPage>;

    /// Look up the realtime endpoint. `None` means the instance has none configured.
    async fn get_websocket_url(&self) -> AppResult<Option<String>>;

    /// Set the version reply over the realtime channel and return the event UUID.
    async fn update_version_via_websocket(
        &self,
        project_uuid: &str,
        version: &str,
    ) -> AppResult<String>;

    /// Create a durable project version linked to a realtime event.
    async fn create_project_version(
        &self,
        project_uuid: &str,
        event_uuid: &str,
        version: &str,
        description: &str,
    ) -> AppResult<Value>;

    /// Resolve the nanopublication template and its `RDF TriG` format.
    async fn get_document_template_and_format(
        &self,
        project: &ProjectInfo,
    ) -> AppResult<(String, String)>;

    /// Create a document for the project state at `event_uuid`.
    async fn create_document(
        &self,
        project: &ProjectInfo,
        template_id: &str,
        format_uuid: &str,
        version: &str,
        event_uuid: &str,
    ) -> AppResult<Document>;

    /// Submit a generated document to the configured submission service.
    async fn submit_document(&self, document: &Document) -> AppResult<Submission>;

    /// Poll until the document reaches `DoneDocumentState` or `ErrorDocumentState`.
    async fn wait_for_document(&self, document: &Document) -> AppResult<Document>;
}

/// Builds a [`WizardApi`] bound to a user token.
///
/// One API handle is created per request and dropped when it completes.
pub trait WizardApiFactory: Send + Sync + 'static {
    /// Create an API handle authenticated as `user_token`.
    fn connect(&self, user_token: &str) -> AppResult<Box<dyn WizardApi>>;
}

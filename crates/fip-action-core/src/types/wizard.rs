//! FAIR Wizard wire models.
//!
//! Only the fields the action reads are modelled; everything is
//! `#[serde(default)]` so partial payloads still deserialize. The
//! questionnaire itself stays a raw `serde_json::Value` because it is echoed
//! back to the caller as debug context.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Questionnaire reply path holding the current FIP version.
pub const VERSION_REPLY_PATH: &str =
    "c1248b82-0538-4780-a0b4-983f632b1615.1c3b8b33-d9b6-435d-a69e-498f09a51fca";

/// Template id prefix of nanopublication document templates.
pub const NANOPUB_TEMPLATE_PREFIX: &str = "dsw:nanopub-template:";

/// Format name the generated document must use.
pub const RDF_TRIG_FORMAT_NAME: &str = "RDF TriG";

/// Template phase filter for suggestions.
pub const RELEASED_TEMPLATE_PHASE: &str = "ReleasedDocumentTemplatePhase";

/// Document successfully generated.
pub const DOCUMENT_STATE_DONE: &str = "DoneDocumentState";

/// Document generation failed.
pub const DOCUMENT_STATE_ERROR: &str = "ErrorDocumentState";

/// Submission accepted by the submission service.
pub const SUBMISSION_STATE_DONE: &str = "DoneSubmissionState";

/// Fallback project name used when synthesizing document names.
pub const UNNAMED_PROJECT: &str = "Unnamed Project";

/// Read the FIP version reply (`replies[path].value.value`) from a questionnaire.
pub fn questionnaire_version(questionnaire: &Value) -> Option<String> {
    questionnaire
        .get("replies")?
        .get(VERSION_REPLY_PATH)?
        .get("value")?
        .get("value")?
        .as_str()
        .map(str::to_string)
}

/// The project fields needed to resolve templates and create documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectInfo {
    /// Project UUID.
    pub uuid: String,
    /// Project name, if set.
    pub name: Option<String>,
    /// Knowledge model package the project is based on.
    pub knowledge_model_package_id: String,
}

impl ProjectInfo {
    /// Extract project info from a raw questionnaire payload.
    ///
    /// Each field is read on its own; a missing, `null` or mistyped field
    /// falls back to its default without affecting the others.
    pub fn from_questionnaire(questionnaire: &Value) -> Self {
        let text = |key: &str| {
            questionnaire
                .get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
        };
        Self {
            uuid: text("uuid").unwrap_or_default(),
            name: text("name"),
            knowledge_model_package_id: text("knowledgeModelPackageId").unwrap_or_default(),
        }
    }

    /// Name of the document generated for `version`.
    pub fn document_name(&self, version: &str) -> String {
        let name = self.name.as_deref().unwrap_or(UNNAMED_PROJECT);
        format!("{name} (v{version})")
    }
}

/// Page of project documents (`_embedded.documents`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentPage {
    /// Embedded collection.
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedDocuments,
}

/// `_embedded` section of a document page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddedDocuments {
    /// Documents on this page.
    pub documents: Vec<Document>,
}

impl DocumentPage {
    /// Documents on this page, in server order.
    pub fn documents(&self) -> &[Document] {
        &self.embedded.documents
    }

    /// Find a document by UUID.
    pub fn find(&self, uuid: &str) -> Option<&Document> {
        self.documents().iter().find(|d| d.uuid == uuid)
    }
}

/// Reference to the project owning a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRef {
    /// Project UUID.
    pub uuid: String,
}

/// A generated project document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Document {
    /// Document UUID.
    pub uuid: String,
    /// Document name.
    pub name: String,
    /// Generation state (`QueuedDocumentState`, `DoneDocumentState`, ...).
    pub state: String,
    /// Owning project.
    pub project: Option<ProjectRef>,
    /// Submissions made from this document.
    pub submissions: Vec<Submission>,
}

impl Document {
    /// Whether generation finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        self.state == DOCUMENT_STATE_DONE || self.state == DOCUMENT_STATE_ERROR
    }

    /// Whether generation finished successfully.
    pub fn is_done(&self) -> bool {
        self.state == DOCUMENT_STATE_DONE
    }

    /// UUID of the owning project, empty when unknown.
    pub fn project_uuid(&self) -> &str {
        self.project.as_ref().map(|p| p.uuid.as_str()).unwrap_or("")
    }
}

/// A submission of a document to an external service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Submission {
    /// Submission UUID.
    pub uuid: String,
    /// Submission state.
    pub state: String,
    /// Where the submitted artifact was published.
    pub location: Option<String>,
    /// Creation timestamp as sent by the server.
    pub created_at: Option<String>,
}

impl Submission {
    /// Whether the submission service accepted the document.
    pub fn is_done(&self) -> bool {
        self.state == SUBMISSION_STATE_DONE
    }
}

/// Page of document template suggestions (`_embedded.documentTemplates`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplatePage {
    /// Embedded collection.
    #[serde(rename = "_embedded")]
    pub embedded: EmbeddedTemplates,
}

/// `_embedded` section of a template page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddedTemplates {
    /// Templates on this page.
    pub document_templates: Vec<DocumentTemplate>,
}

impl DocumentTemplatePage {
    /// First nanopublication template exposing an `RDF TriG` format.
    ///
    /// Templates and formats are considered in list order.
    pub fn select_nanopub_trig(&self) -> Option<(String, String)> {
        self.embedded
            .document_templates
            .iter()
            .filter(|t| t.id.starts_with(NANOPUB_TEMPLATE_PREFIX))
            .find_map(|t| {
                t.formats
                    .iter()
                    .find(|f| f.name == RDF_TRIG_FORMAT_NAME && !f.uuid.is_empty())
                    .map(|f| (t.id.clone(), f.uuid.clone()))
            })
    }
}

/// A document template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplate {
    /// Template id, e.g. `dsw:nanopub-template:1.0.0`.
    pub id: String,
    /// Template name.
    pub name: String,
    /// Output formats.
    pub formats: Vec<DocumentTemplateFormat>,
}

/// An output format of a document template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentTemplateFormat {
    /// Format UUID.
    pub uuid: String,
    /// Display name, e.g. `RDF TriG`.
    pub name: String,
}

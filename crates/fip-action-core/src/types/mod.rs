//! Shared domain types: FAIR Wizard wire models, action request/result
//! types, and three-part version handling.

pub mod action;
pub mod version;
pub mod wizard;

pub use action::{
    ActionRequest, PrepareResult, SubmittedVersion, VersionRequest, VersionSubmitResult,
};
pub use version::{SemanticVersion, VersionSuggestions};
pub use wizard::{
    Document, DocumentPage, DocumentTemplate, DocumentTemplateFormat, DocumentTemplatePage,
    ProjectInfo, Submission,
};

//! Progress markers of the submit workflow.

use std::fmt;

/// Where the submit workflow currently is.
///
/// `Start → VersionMutated → VersionRecorded → { Done | TemplateResolved →
/// DocumentCreated → DocumentPolling → DocumentDone | DocumentError →
/// [SubmissionCreated] }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStage {
    /// Nothing done yet.
    Start,
    /// Version reply set over the realtime channel.
    VersionMutated,
    /// Version record created.
    VersionRecorded,
    /// Nanopublication template and format resolved.
    TemplateResolved,
    /// Document generation requested.
    DocumentCreated,
    /// Waiting for document generation.
    DocumentPolling,
    /// Document generated.
    DocumentDone,
    /// Document generation failed.
    DocumentError,
    /// Document handed to the submission service.
    SubmissionCreated,
    /// Mutate-only workflow finished.
    Done,
}

impl SubmitStage {
    /// Stable name used in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::VersionMutated => "version_mutated",
            Self::VersionRecorded => "version_recorded",
            Self::TemplateResolved => "template_resolved",
            Self::DocumentCreated => "document_created",
            Self::DocumentPolling => "document_polling",
            Self::DocumentDone => "document_done",
            Self::DocumentError => "document_error",
            Self::SubmissionCreated => "submission_created",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for SubmitStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Prepare and submit workflows.
//!
//! Both workflows are plain sequences of awaited calls. A fresh
//! [`WizardApi`] is built from the caller's token for every request and
//! dropped when the workflow returns. Failures never escape: they become an
//! `ok=false` result carrying the error message.

use std::sync::Arc;

use tracing::{debug, info, warn};

use fip_action_core::config::PublishMode;
use fip_action_core::result::AppResult;
use fip_action_core::traits::{NanopubSource, WizardApi, WizardApiFactory};
use fip_action_core::types::wizard::{DocumentPage, ProjectInfo, questionnaire_version};
use fip_action_core::types::{
    ActionRequest, PrepareResult, SemanticVersion, SubmittedVersion, VersionRequest,
    VersionSubmitResult, VersionSuggestions,
};

use crate::stage::SubmitStage;

/// Sequences FAIR Wizard, realtime, and nanopublication calls into the action workflows.
#[derive(Clone)]
pub struct SubmissionOrchestrator {
    wizard: Arc<dyn WizardApiFactory>,
    nanopubs: Arc<dyn NanopubSource>,
    mode: PublishMode,
}

impl SubmissionOrchestrator {
    /// Create an orchestrator.
    pub fn new(
        wizard: Arc<dyn WizardApiFactory>,
        nanopubs: Arc<dyn NanopubSource>,
        mode: PublishMode,
    ) -> Self {
        Self {
            wizard,
            nanopubs,
            mode,
        }
    }

    /// Submit workflow variant in use.
    pub fn mode(&self) -> PublishMode {
        self.mode
    }

    /// Summarize the project's current and already published versions.
    pub async fn prepare_action(&self, req: &ActionRequest) -> PrepareResult {
        let api = match self.wizard.connect(&req.user_token) {
            Ok(api) => api,
            Err(e) => return PrepareResult::failed(format!("Failed to prepare action: {}", e.message)),
        };

        let questionnaire = match api.fetch_questionnaire(&req.project_uuid).await {
            Ok(q) => q,
            Err(e) => {
                warn!(project_uuid = %req.project_uuid, error = %e, "Questionnaire fetch failed");
                return PrepareResult::failed(format!(
                    "Failed to fetch questionnaire: {}",
                    e.message
                ));
            }
        };
        let current_version = questionnaire_version(&questionnaire);

        let documents = match api.fetch_documents(&req.project_uuid).await {
            Ok(page) => page,
            Err(e) => {
                warn!(project_uuid = %req.project_uuid, error = %e, "Documents fetch failed");
                return PrepareResult::failed(format!("Failed to fetch documents: {}", e.message));
            }
        };

        let mut submitted = completed_submissions(&documents);
        self.resolve_versions(&mut submitted).await;

        let latest_version = SemanticVersion::latest(
            submitted.iter().filter_map(|s| s.version.as_deref()),
        )
        .map(|v| v.to_string());

        info!(
            project_uuid = %req.project_uuid,
            submitted = submitted.len(),
            resolved = submitted.iter().filter(|s| s.version.is_some()).count(),
            "Action prepared"
        );

        PrepareResult {
            ok: true,
            message: "Action is ready".to_string(),
            suggestions: Some(VersionSuggestions::from_working_version(
                current_version.as_deref(),
            )),
            questionnaire_version: current_version,
            submitted_versions: submitted,
            latest_version,
            debug: Some(questionnaire),
        }
    }

    /// Fill in `version` for each entry, one nanopublication at a time.
    ///
    /// An entry whose nanopublication cannot be fetched or parsed keeps
    /// `version = None`; the rest of the batch continues.
    async fn resolve_versions(&self, submitted: &mut [SubmittedVersion]) {
        for entry in submitted.iter_mut() {
            match self.nanopubs.fetch_nanopub(&entry.uri).await {
                Ok(content) => {
                    entry.version = fip_action_rdf::extract_version_lenient(&content);
                }
                Err(e) => {
                    debug!(uri = %entry.uri, error = %e, "Nanopublication unavailable");
                }
            }
        }
    }

    /// Publish `req.version`: set the reply, record the version, and in
    /// [`PublishMode::MutateAndPublish`] generate and submit the nanopublication.
    ///
    /// Completed steps are not rolled back when a later one fails.
    pub async fn submit_version(&self, req: &VersionRequest) -> VersionSubmitResult {
        let mut result = VersionSubmitResult::default();
        if let Err(e) = self.run_submit(req, &mut result).await {
            warn!(
                project_uuid = %req.project_uuid,
                version = %req.version,
                error = %e,
                "Version submission failed"
            );
            result.ok = false;
            result.message = match self.mode {
                PublishMode::MutateOnly => format!("Failed to submit version: {}", e.message),
                PublishMode::MutateAndPublish => {
                    format!("Failed to submit version due to error: {}", e.message)
                }
            };
        }
        result
    }

    async fn run_submit(
        &self,
        req: &VersionRequest,
        result: &mut VersionSubmitResult,
    ) -> AppResult<()> {
        let project_uuid = req.project_uuid.as_str();
        let api = self.wizard.connect(&req.user_token)?;
        log_stage(project_uuid, SubmitStage::Start);

        let event_uuid = api
            .update_version_via_websocket(project_uuid, &req.version)
            .await?;
        log_stage(project_uuid, SubmitStage::VersionMutated);

        api.create_project_version(project_uuid, &event_uuid, &req.version, &req.description)
            .await?;
        log_stage(project_uuid, SubmitStage::VersionRecorded);

        if self.mode == PublishMode::MutateOnly {
            log_stage(project_uuid, SubmitStage::Done);
            result.ok = true;
            result.message = format!("Version {} submitted successfully", req.version);
            return Ok(());
        }

        self.publish(api.as_ref(), req, &event_uuid, result).await
    }

    async fn publish(
        &self,
        api: &dyn WizardApi,
        req: &VersionRequest,
        event_uuid: &str,
        result: &mut VersionSubmitResult,
    ) -> AppResult<()> {
        let project_uuid = req.project_uuid.as_str();
        let questionnaire = api.fetch_questionnaire(project_uuid).await?;
        let mut project = ProjectInfo::from_questionnaire(&questionnaire);
        if project.uuid.is_empty() {
            project.uuid = req.project_uuid.clone();
        }

        let (template_id, format_uuid) = api.get_document_template_and_format(&project).await?;
        log_stage(project_uuid, SubmitStage::TemplateResolved);

        let created = api
            .create_document(&project, &template_id, &format_uuid, &req.version, event_uuid)
            .await?;
        result.document_uuid = Some(created.uuid.clone());
        log_stage(project_uuid, SubmitStage::DocumentCreated);

        log_stage(project_uuid, SubmitStage::DocumentPolling);
        let document = api.wait_for_document(&created).await?;
        result.document_uuid = Some(document.uuid.clone());

        if !document.is_done() {
            log_stage(project_uuid, SubmitStage::DocumentError);
            result.ok = true;
            result.message = "Document could not be created".to_string();
            return Ok(());
        }
        log_stage(project_uuid, SubmitStage::DocumentDone);
        result.document_done = true;

        let submission = api.submit_document(&document).await?;
        log_stage(project_uuid, SubmitStage::SubmissionCreated);

        result.ok = true;
        result.message = "Version submitted successfully".to_string();
        result.submission_done = submission.is_done();
        result.submission_uuid = Some(submission.uuid).filter(|u| !u.is_empty());
        result.submission_location = submission.location;
        Ok(())
    }
}

/// Completed submissions across all documents, in list order, version unresolved.
fn completed_submissions(documents: &DocumentPage) -> Vec<SubmittedVersion> {
    documents
        .documents()
        .iter()
        .flat_map(|doc| doc.submissions.iter())
        .filter(|s| s.is_done())
        .map(|s| SubmittedVersion {
            uri: s.location.clone().unwrap_or_default(),
            version: None,
            submitted_at: s.created_at.clone(),
        })
        .collect()
}

fn log_stage(project_uuid: &str, stage: SubmitStage) {
    info!(project_uuid = %project_uuid, stage = %stage, "Submit workflow progressed");
}

//! FAIR Wizard client tests against the mock server.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use fip_action_core::error::ErrorKind;
use fip_action_core::traits::{NanopubSource, WizardApi};
use fip_action_core::types::wizard::{Document, ProjectInfo, ProjectRef, VERSION_REPLY_PATH};
use fip_action_wizard::{HttpNanopubSource, WizardClient, WizardClientConfig};

use helpers::{
    CREATED_DOCUMENT_UUID, MockOptions, MockWizard, PROJECT_UUID, TEMPLATE_ID, TOKEN,
    TRIG_FORMAT_UUID,
};

fn client(mock: &MockWizard) -> WizardClient {
    let config = WizardClientConfig::from(&mock.app_config().wizard);
    WizardClient::new(Arc::new(config), TOKEN).expect("client")
}

fn project() -> ProjectInfo {
    ProjectInfo {
        uuid: PROJECT_UUID.to_string(),
        name: Some("Demo FIP".to_string()),
        knowledge_model_package_id: "fairwizard:fip:1.0.0".to_string(),
    }
}

fn created_document() -> Document {
    Document {
        uuid: CREATED_DOCUMENT_UUID.to_string(),
        project: Some(ProjectRef {
            uuid: PROJECT_UUID.to_string(),
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_fetch_questionnaire_and_documents() {
    let mock = MockWizard::start().await;
    let client = client(&mock);

    let questionnaire = client.fetch_questionnaire(PROJECT_UUID).await.unwrap();
    assert_eq!(
        questionnaire["replies"][VERSION_REPLY_PATH]["value"]["value"],
        "1.2.0"
    );

    let page = client.fetch_documents(PROJECT_UUID).await.unwrap();
    assert_eq!(page.documents().len(), 2);
    assert_eq!(page.documents()[0].submissions.len(), 2);
}

#[tokio::test]
async fn test_websocket_url_from_bootstrap() {
    let mock = MockWizard::start().await;
    let url = client(&mock).get_websocket_url().await.unwrap();
    assert_eq!(
        url.as_deref(),
        Some(format!("{}/ws", mock.base_url.replace("http://", "ws://")).as_str())
    );

    let bare = MockWizard::start_with(MockOptions {
        with_websocket: false,
        ..Default::default()
    })
    .await;
    assert_eq!(client(&bare).get_websocket_url().await.unwrap(), None);
}

#[tokio::test]
async fn test_update_version_via_websocket_sends_one_set_reply() {
    let mock = MockWizard::start().await;
    let event_uuid = client(&mock)
        .update_version_via_websocket(PROJECT_UUID, "2.0.0")
        .await
        .unwrap();

    let messages = mock.ws_messages();
    assert_eq!(messages.len(), 1);
    let message = &messages[0];
    assert_eq!(message["type"], "SetContent_ClientProjectMessage");
    assert_eq!(message["data"]["type"], "SetReplyEvent");
    assert_eq!(message["data"]["uuid"], event_uuid.as_str());
    assert_eq!(message["data"]["path"], VERSION_REPLY_PATH);
    assert_eq!(message["data"]["value"]["type"], "StringReply");
    assert_eq!(message["data"]["value"]["value"], "2.0.0");

    let (query, origin) = mock.ws_handshake().expect("handshake");
    assert_eq!(query["Authorization"], format!("Bearer {TOKEN}"));
    assert_eq!(query["subscription"], "Project");
    assert_eq!(query["identifier"], PROJECT_UUID);
    assert_eq!(origin.as_deref(), Some(format!("{}/wizard", mock.base_url).as_str()));
}

#[tokio::test]
async fn test_update_version_without_websocket_url_fails() {
    let mock = MockWizard::start_with(MockOptions {
        with_websocket: false,
        ..Default::default()
    })
    .await;
    let err = client(&mock)
        .update_version_via_websocket(PROJECT_UUID, "2.0.0")
        .await
        .unwrap_err();
    assert_eq!(err.message, "WebSocket URL not found in FAIR Wizard config");
    assert!(mock.ws_handshake().is_none());
}

#[tokio::test]
async fn test_create_project_version_posts_event_uuid() {
    let mock = MockWizard::start().await;
    client(&mock)
        .create_project_version(PROJECT_UUID, "evt-1", "2.0.0", "Second release")
        .await
        .unwrap();

    let body = mock
        .body(&format!("/projects/{PROJECT_UUID}/versions"))
        .expect("version body");
    assert_eq!(body["eventUuid"], "evt-1");
    assert_eq!(body["name"], "2.0.0");
    assert_eq!(body["description"], "Second release");
}

#[tokio::test]
async fn test_template_selection_skips_non_nanopub_templates() {
    let mock = MockWizard::start().await;
    let (template_id, format_uuid) = client(&mock)
        .get_document_template_and_format(&project())
        .await
        .unwrap();
    assert_eq!(template_id, TEMPLATE_ID);
    assert_eq!(format_uuid, TRIG_FORMAT_UUID);

    let query = mock.body("/document-templates/suggestions").expect("query");
    assert_eq!(query["pkgId"], "fairwizard:fip:1.0.0");
    assert_eq!(query["phase"], "ReleasedDocumentTemplatePhase");
    assert_eq!(query["page"], "0");
}

#[tokio::test]
async fn test_template_not_found() {
    let mock = MockWizard::start_with(MockOptions {
        with_template: false,
        ..Default::default()
    })
    .await;
    let err = client(&mock)
        .get_document_template_and_format(&project())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(err.message, "No suitable nanopublication document template found");
}

#[tokio::test]
async fn test_create_document_and_wait_until_done() {
    let mock = MockWizard::start_with(MockOptions {
        pending_polls: 2,
        ..Default::default()
    })
    .await;
    let client = client(&mock);

    let created = client
        .create_document(&project(), TEMPLATE_ID, TRIG_FORMAT_UUID, "2.0.0", "evt-1")
        .await
        .unwrap();
    assert_eq!(created.uuid, CREATED_DOCUMENT_UUID);
    assert_eq!(created.project_uuid(), PROJECT_UUID);

    let body = mock.body("/documents").expect("document body");
    assert_eq!(body["name"], "Demo FIP (v2.0.0)");
    assert_eq!(body["projectUuid"], PROJECT_UUID);
    assert_eq!(body["documentTemplateId"], TEMPLATE_ID);
    assert_eq!(body["formatUuid"], TRIG_FORMAT_UUID);
    assert_eq!(body["projectEventUuid"], "evt-1");

    let done = client.wait_for_document(&created).await.unwrap();
    assert!(done.is_done());
    assert_eq!(mock.polls(), 3);
}

#[tokio::test]
async fn test_wait_for_document_returns_error_state() {
    let mock = MockWizard::start_with(MockOptions {
        pending_polls: 0,
        final_state: "ErrorDocumentState",
        ..Default::default()
    })
    .await;
    let client = client(&mock);
    let created = client
        .create_document(&project(), TEMPLATE_ID, TRIG_FORMAT_UUID, "2.0.0", "evt-1")
        .await
        .unwrap();

    let finished = client.wait_for_document(&created).await.unwrap();
    assert!(finished.is_terminal());
    assert!(!finished.is_done());
}

#[tokio::test]
async fn test_wait_for_vanished_document_fails() {
    let mock = MockWizard::start_with(MockOptions {
        lose_document: true,
        ..Default::default()
    })
    .await;
    let err = client(&mock)
        .wait_for_document(&created_document())
        .await
        .unwrap_err();
    assert_eq!(err.message, "Document not found after creation");
}

#[tokio::test]
async fn test_submit_document_uses_configured_service() {
    let mock = MockWizard::start().await;
    let submission = client(&mock)
        .submit_document(&created_document())
        .await
        .unwrap();
    assert!(submission.is_done());
    assert_eq!(
        submission.location.as_deref(),
        Some(format!("{}/np/RAnew", mock.base_url).as_str())
    );

    let body = mock
        .body(&format!("/documents/{CREATED_DOCUMENT_UUID}/submissions"))
        .expect("submission body");
    assert_eq!(body["serviceId"], "nanopub-test");
}

#[tokio::test]
async fn test_nanopub_source_fetches_trig_and_reports_http_errors() {
    let mock = MockWizard::start().await;
    let source = HttpNanopubSource::new(Duration::from_secs(5), "test-agent").unwrap();

    let content = source
        .fetch_nanopub(&format!("{}/np/RA1", mock.base_url))
        .await
        .unwrap();
    assert!(content.contains("FAIR-Implementation-Profile"));

    let err = source
        .fetch_nanopub(&format!("{}/np/missing", mock.base_url))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::ExternalService);
}

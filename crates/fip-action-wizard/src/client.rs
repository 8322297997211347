//! Authenticated FAIR Wizard REST client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, info};

use fip_action_core::config::wizard::WizardConfig;
use fip_action_core::error::{AppError, ErrorKind};
use fip_action_core::result::AppResult;
use fip_action_core::traits::{WizardApi, WizardApiFactory};
use fip_action_core::types::wizard::{
    Document, DocumentPage, DocumentTemplatePage, ProjectInfo, RELEASED_TEMPLATE_PHASE, Submission,
};

use crate::realtime::{self, RealtimeSession, SetReplyMessage};

/// Immutable settings shared by every client built for a request.
#[derive(Debug, Clone)]
pub struct WizardClientConfig {
    /// API base URL without trailing `/`.
    pub api_url: String,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
    /// Per-call transport timeout.
    pub timeout: Duration,
    /// Delay between document state polls.
    pub poll_interval: Duration,
    /// Page size for template suggestions and document polling.
    pub page_size: u32,
    /// Submission service id used by [`WizardApi::submit_document`].
    pub submission_service_id: String,
}

impl From<&WizardConfig> for WizardClientConfig {
    fn from(config: &WizardConfig) -> Self {
        Self {
            api_url: config.normalized_api_url().to_string(),
            user_agent: config.user_agent.clone(),
            timeout: config.request_timeout(),
            poll_interval: config.poll_interval(),
            page_size: config.page_size,
            submission_service_id: config.submission_service_id.clone(),
        }
    }
}

/// FAIR Wizard client bound to one API URL and one bearer token.
#[derive(Debug, Clone)]
pub struct WizardClient {
    config: Arc<WizardClientConfig>,
    token: String,
    http: reqwest::Client,
}

impl WizardClient {
    /// Create a client authenticated as `user_token`.
    pub fn new(config: Arc<WizardClientConfig>, user_token: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Internal,
                    format!("Failed to create HTTP client: {e}"),
                    e,
                )
            })?;

        Ok(Self {
            config,
            token: user_token.into(),
            http,
        })
    }

    /// Client settings.
    pub fn config(&self) -> &WizardClientConfig {
        &self.config
    }

    /// `Origin` the realtime endpoint expects: the API URL with `wizard-api` replaced by `wizard`.
    pub fn origin(&self) -> String {
        realtime::derive_origin(&self.config.api_url)
    }

    fn url(&self, path: &str, params: &[(&str, String)]) -> AppResult<Url> {
        let raw = format!("{}{}", self.config.api_url, path);
        let parsed = if params.is_empty() {
            Url::parse(&raw)
        } else {
            Url::parse_with_params(&raw, params)
        };
        parsed.map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid FAIR Wizard URL '{raw}': {e}"),
                e,
            )
        })
    }

    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<&Value>,
    ) -> AppResult<T> {
        let url = self.url(path, params)?;
        debug!(method = %method, path = %path, "FAIR Wizard request");

        let mut request = self
            .http
            .request(method.clone(), url)
            .bearer_auth(&self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let transport = |e: reqwest::Error| {
            AppError::with_source(
                ErrorKind::ExternalService,
                format!("{method} {path} failed: {e}"),
                e,
            )
        };

        let response = request
            .send()
            .await
            .map_err(transport)?
            .error_for_status()
            .map_err(transport)?;

        response.json::<T>().await.map_err(transport)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, String)]) -> AppResult<T> {
        self.send(Method::GET, path, params, None).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> AppResult<T> {
        let body = serde_json::to_value(body)?;
        self.send(Method::POST, path, &[], Some(&body)).await
    }

    fn document_poll_params(&self) -> [(&'static str, String); 3] {
        [
            ("page", "0".to_string()),
            ("size", self.config.page_size.to_string()),
            ("sort", "createdAt,desc".to_string()),
        ]
    }
}

#[async_trait]
impl WizardApi for WizardClient {
    async fn fetch_questionnaire(&self, project_uuid: &str) -> AppResult<Value> {
        self.get(&format!("/projects/{project_uuid}/questionnaire"), &[])
            .await
    }

    async fn fetch_documents(&self, project_uuid: &str) -> AppResult<DocumentPage> {
        self.get(&format!("/projects/{project_uuid}/documents"), &[])
            .await
    }

    async fn get_websocket_url(&self) -> AppResult<Option<String>> {
        let bootstrap: Value = self.get("/configs/bootstrap", &[]).await?;
        Ok(bootstrap
            .get("signalBridge")
            .and_then(|bridge| bridge.get("webSocketUrl"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
            .map(str::to_string))
    }

    async fn update_version_via_websocket(
        &self,
        project_uuid: &str,
        version: &str,
    ) -> AppResult<String> {
        let ws_url = self
            .get_websocket_url()
            .await?
            .ok_or_else(|| AppError::realtime("WebSocket URL not found in FAIR Wizard config"))?;

        let socket_url = realtime::socket_url(&ws_url, &self.token, project_uuid)?;
        let session = RealtimeSession::connect(
            &socket_url,
            &self.origin(),
            &self.config.user_agent,
            self.config.timeout,
        )
        .await?;

        let message = SetReplyMessage::version(version);
        let event_uuid = message.event_uuid().to_string();
        session.set_reply(&message).await?;

        info!(
            project_uuid = %project_uuid,
            event_uuid = %event_uuid,
            "Version reply set over realtime channel"
        );
        Ok(event_uuid)
    }

    async fn create_project_version(
        &self,
        project_uuid: &str,
        event_uuid: &str,
        version: &str,
        description: &str,
    ) -> AppResult<Value> {
        self.post(
            &format!("/projects/{project_uuid}/versions"),
            &json!({
                "eventUuid": event_uuid,
                "name": version,
                "description": description,
            }),
        )
        .await
    }

    async fn get_document_template_and_format(
        &self,
        project: &ProjectInfo,
    ) -> AppResult<(String, String)> {
        let params = [
            ("page", "0".to_string()),
            ("size", self.config.page_size.to_string()),
            ("pkgId", project.knowledge_model_package_id.clone()),
            ("phase", RELEASED_TEMPLATE_PHASE.to_string()),
        ];
        let page: DocumentTemplatePage = self
            .get("/document-templates/suggestions", &params)
            .await?;

        page.select_nanopub_trig()
            .ok_or_else(|| AppError::not_found("No suitable nanopublication document template found"))
    }

    async fn create_document(
        &self,
        project: &ProjectInfo,
        template_id: &str,
        format_uuid: &str,
        version: &str,
        event_uuid: &str,
    ) -> AppResult<Document> {
        self.post(
            "/documents",
            &json!({
                "name": project.document_name(version),
                "projectUuid": project.uuid,
                "documentTemplateId": template_id,
                "formatUuid": format_uuid,
                "projectEventUuid": event_uuid,
            }),
        )
        .await
    }

    async fn submit_document(&self, document: &Document) -> AppResult<Submission> {
        self.post(
            &format!("/documents/{}/submissions", document.uuid),
            &json!({ "serviceId": self.config.submission_service_id }),
        )
        .await
    }

    async fn wait_for_document(&self, document: &Document) -> AppResult<Document> {
        let path = format!("/projects/{}/documents", document.project_uuid());
        let params = self.document_poll_params();

        loop {
            let page: DocumentPage = self.get(&path, &params).await?;
            let current = page
                .find(&document.uuid)
                .ok_or_else(|| AppError::not_found("Document not found after creation"))?;

            if current.is_terminal() {
                return Ok(current.clone());
            }

            debug!(
                document_uuid = %document.uuid,
                state = %current.state,
                "Document not ready, polling again"
            );
            tokio::time::sleep(self.config.poll_interval).await;
        }
    }
}

/// Creates one [`WizardClient`] per request from shared settings.
#[derive(Debug, Clone)]
pub struct WizardClientFactory {
    config: Arc<WizardClientConfig>,
}

impl WizardClientFactory {
    /// Create a factory from client settings.
    pub fn new(config: WizardClientConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

impl WizardApiFactory for WizardClientFactory {
    fn connect(&self, user_token: &str) -> AppResult<Box<dyn WizardApi>> {
        Ok(Box::new(WizardClient::new(
            Arc::clone(&self.config),
            user_token,
        )?))
    }
}

//! Shared test helpers for integration tests.
//!
//! [`MockWizard`] is an in-process FAIR Wizard: REST API under `/wizard-api`,
//! the realtime socket at `/ws`, and a nanopublication server at `/np/{id}`.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde_json::{Value, json};

use fip_action_core::config::AppConfig;
use fip_action_core::types::wizard::VERSION_REPLY_PATH;

pub const PROJECT_UUID: &str = "0b6e7a8f-1a8c-4e7d-9d0b-5c1f2f0f7a11";
pub const CREATED_DOCUMENT_UUID: &str = "d0c00000-0000-4000-8000-000000000001";
pub const CREATED_SUBMISSION_UUID: &str = "5b000000-0000-4000-8000-000000000001";
pub const TEMPLATE_ID: &str = "dsw:nanopub-template:1.4.0";
pub const TRIG_FORMAT_UUID: &str = "f0000000-0000-4000-8000-00000000001f";
pub const TOKEN: &str = "test-token";

/// Knobs for one mock server instance.
#[derive(Debug, Clone)]
pub struct MockOptions {
    /// Advertise a realtime socket URL in the bootstrap config.
    pub with_websocket: bool,
    /// Offer a nanopublication template with an RDF TriG format.
    pub with_template: bool,
    /// Polls answered with an in-progress state before the final one.
    pub pending_polls: usize,
    /// State reported once polling finishes.
    pub final_state: &'static str,
    /// Drop the created document from poll responses.
    pub lose_document: bool,
}

impl Default for MockOptions {
    fn default() -> Self {
        Self {
            with_websocket: true,
            with_template: true,
            pending_polls: 1,
            final_state: "DoneDocumentState",
            lose_document: false,
        }
    }
}

struct MockState {
    base_url: String,
    options: MockOptions,
    calls: Mutex<Vec<String>>,
    bodies: Mutex<HashMap<String, Value>>,
    ws_messages: Mutex<Vec<Value>>,
    ws_handshake: Mutex<Option<(HashMap<String, String>, Option<String>)>>,
    document_created: Mutex<bool>,
    polls: AtomicUsize,
}

impl MockState {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

/// A running mock FAIR Wizard.
pub struct MockWizard {
    /// REST base URL (`.../wizard-api`).
    pub api_url: String,
    /// Server root URL.
    pub base_url: String,
    state: Arc<MockState>,
}

impl MockWizard {
    /// Start a mock with default options.
    pub async fn start() -> Self {
        Self::start_with(MockOptions::default()).await
    }

    /// Start a mock on an ephemeral port.
    pub async fn start_with(options: MockOptions) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock wizard");
        let addr = listener.local_addr().expect("local addr");
        let base_url = format!("http://{addr}");

        let state = Arc::new(MockState {
            base_url: base_url.clone(),
            options,
            calls: Mutex::new(Vec::new()),
            bodies: Mutex::new(HashMap::new()),
            ws_messages: Mutex::new(Vec::new()),
            ws_handshake: Mutex::new(None),
            document_created: Mutex::new(false),
            polls: AtomicUsize::new(0),
        });

        let api = Router::new()
            .route("/configs/bootstrap", get(bootstrap))
            .route("/projects/{id}/questionnaire", get(questionnaire))
            .route("/projects/{id}/documents", get(documents))
            .route("/projects/{id}/versions", post(create_version))
            .route("/document-templates/suggestions", get(template_suggestions))
            .route("/documents", post(create_document))
            .route("/documents/{id}/submissions", post(create_submission));

        let app = Router::new()
            .nest("/wizard-api", api)
            .route("/ws", get(ws_upgrade))
            .route("/np/{id}", get(nanopub))
            .with_state(Arc::clone(&state));

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock wizard server");
        });

        Self {
            api_url: format!("{base_url}/wizard-api"),
            base_url,
            state,
        }
    }

    /// Calls received so far, as `METHOD /path`.
    pub fn calls(&self) -> Vec<String> {
        self.state.calls.lock().unwrap().clone()
    }

    /// Whether a call was received.
    pub fn was_called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| c == call)
    }

    /// Last JSON body posted to `path`.
    pub fn body(&self, path: &str) -> Option<Value> {
        self.state.bodies.lock().unwrap().get(path).cloned()
    }

    /// Messages received over the realtime socket.
    pub fn ws_messages(&self) -> Vec<Value> {
        self.state.ws_messages.lock().unwrap().clone()
    }

    /// Query parameters and `Origin` of the last socket handshake.
    pub fn ws_handshake(&self) -> Option<(HashMap<String, String>, Option<String>)> {
        self.state.ws_handshake.lock().unwrap().clone()
    }

    /// Number of document polls that saw the created document.
    pub fn polls(&self) -> usize {
        self.state.polls.load(Ordering::SeqCst)
    }

    /// Application config pointing at this mock with a fast poll interval.
    pub fn app_config(&self) -> AppConfig {
        let mut config = AppConfig::default();
        config.wizard.api_url = self.api_url.clone();
        config.wizard.poll_interval_ms = 10;
        config.wizard.request_timeout_seconds = 5;
        config
    }
}

async fn bootstrap(State(state): State<Arc<MockState>>) -> Json<Value> {
    state.record("GET /configs/bootstrap");
    if !state.options.with_websocket {
        return Json(json!({ "signalBridge": {} }));
    }
    let ws_url = state.base_url.replace("http://", "ws://") + "/ws";
    Json(json!({ "signalBridge": { "webSocketUrl": ws_url } }))
}

async fn questionnaire(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
) -> Json<Value> {
    state.record(format!("GET /projects/{id}/questionnaire"));
    let mut replies = serde_json::Map::new();
    replies.insert(
        VERSION_REPLY_PATH.to_string(),
        json!({ "value": { "type": "StringReply", "value": "1.2.0" } }),
    );
    Json(json!({
        "uuid": id,
        "name": "Demo FIP",
        "knowledgeModelPackageId": "fairwizard:fip:1.0.0",
        "replies": replies
    }))
}

async fn documents(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record(format!("GET /projects/{id}/documents"));

    let mut documents = Vec::new();
    let created = *state.document_created.lock().unwrap();
    if created && !state.options.lose_document {
        let polled = state.polls.fetch_add(1, Ordering::SeqCst) + 1;
        let doc_state = if polled <= state.options.pending_polls {
            "InProgressDocumentState"
        } else {
            state.options.final_state
        };
        documents.push(json!({
            "uuid": CREATED_DOCUMENT_UUID,
            "name": "Demo FIP (v2.0.0)",
            "state": doc_state,
            "project": { "uuid": id },
            "submissions": []
        }));
    }

    if !query.contains_key("sort") {
        documents.push(json!({
            "uuid": "d-old-1",
            "name": "Demo FIP (v1.2.0)",
            "state": "DoneDocumentState",
            "project": { "uuid": id },
            "submissions": [
                {
                    "uuid": "s-1",
                    "state": "DoneSubmissionState",
                    "location": format!("{}/np/RA1", state.base_url),
                    "createdAt": "2024-03-01T10:00:00Z"
                },
                {
                    "uuid": "s-2",
                    "state": "ErrorSubmissionState",
                    "location": format!("{}/np/RA2", state.base_url),
                    "createdAt": "2024-03-02T10:00:00Z"
                }
            ]
        }));
        documents.push(json!({
            "uuid": "d-old-2",
            "name": "Demo FIP (v0.1.0)",
            "state": "DoneDocumentState",
            "project": { "uuid": id },
            "submissions": [
                {
                    "uuid": "s-3",
                    "state": "DoneSubmissionState",
                    "location": format!("{}/np/missing", state.base_url),
                    "createdAt": "2024-01-01T10:00:00Z"
                }
            ]
        }));
    }

    Json(json!({ "_embedded": { "documents": documents } }))
}

async fn create_version(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let path = format!("/projects/{id}/versions");
    state.record(format!("POST {path}"));
    state.bodies.lock().unwrap().insert(path, body.clone());
    Json(json!({ "uuid": "v-1", "name": body["name"], "eventUuid": body["eventUuid"] }))
}

async fn template_suggestions(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.record("GET /document-templates/suggestions");
    state
        .bodies
        .lock()
        .unwrap()
        .insert("/document-templates/suggestions".to_string(), json!(query));

    let mut templates = vec![json!({
        "id": "dsw:questionnaire-report:2.0.0",
        "name": "Questionnaire Report",
        "formats": [{ "uuid": "f-html", "name": "HTML" }]
    })];
    if state.options.with_template {
        templates.push(json!({
            "id": TEMPLATE_ID,
            "name": "Nanopublication",
            "formats": [
                { "uuid": "f-jsonld", "name": "JSON-LD" },
                { "uuid": TRIG_FORMAT_UUID, "name": "RDF TriG" }
            ]
        }));
    }
    Json(json!({ "_embedded": { "documentTemplates": templates } }))
}

async fn create_document(
    State(state): State<Arc<MockState>>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.record("POST /documents");
    state
        .bodies
        .lock()
        .unwrap()
        .insert("/documents".to_string(), body.clone());
    *state.document_created.lock().unwrap() = true;
    Json(json!({
        "uuid": CREATED_DOCUMENT_UUID,
        "name": body["name"],
        "state": "QueuedDocumentState",
        "project": { "uuid": body["projectUuid"] },
        "submissions": []
    }))
}

async fn create_submission(
    State(state): State<Arc<MockState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Json<Value> {
    let path = format!("/documents/{id}/submissions");
    state.record(format!("POST {path}"));
    state.bodies.lock().unwrap().insert(path, body);
    Json(json!({
        "uuid": CREATED_SUBMISSION_UUID,
        "state": "DoneSubmissionState",
        "location": format!("{}/np/RAnew", state.base_url),
        "createdAt": "2024-04-01T10:00:00Z"
    }))
}

async fn ws_upgrade(
    ws: WebSocketUpgrade,
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let origin = headers
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    *state.ws_handshake.lock().unwrap() = Some((query, origin));
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: Arc<MockState>) {
    if socket
        .send(Message::Text(r#"{"type":"SetUserList_ServerProjectMessage","data":[]}"#.into()))
        .await
        .is_err()
    {
        return;
    }

    while let Some(Ok(message)) = socket.recv().await {
        match message {
            Message::Text(text) => {
                let value: Value = serde_json::from_str(text.as_str()).unwrap_or(Value::Null);
                state.ws_messages.lock().unwrap().push(value.clone());
                let ack = json!({ "type": "SetContent_ServerProjectMessage", "data": value["data"] });
                if socket.send(Message::Text(ack.to_string().into())).await.is_err() {
                    return;
                }
            }
            Message::Close(_) => return,
            _ => {}
        }
    }
}

async fn nanopub(Path(id): Path<String>) -> Response {
    let version = match id.as_str() {
        "RA1" => "1.2.0",
        "RA2" => "0.9.0",
        "RAnew" => "2.0.0",
        _ => return StatusCode::NOT_FOUND.into_response(),
    };
    let body = format!(
        r#"@prefix fip: <https://w3id.org/fair/fip/terms/> .
@prefix schema: <https://schema.org/> .
<https://w3id.org/np/{id}#assertion> {{
    <https://w3id.org/np/{id}#fip> a fip:FAIR-Implementation-Profile ;
        schema:version "{version}" .
}}
"#
    );
    ([(header::CONTENT_TYPE, "application/trig")], body).into_response()
}

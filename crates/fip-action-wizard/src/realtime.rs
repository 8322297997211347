//! Realtime update channel.
//!
//! The FAIR Wizard pushes questionnaire edits over a websocket. The action
//! uses it for exactly one round trip: read the server greeting, send one
//! `SetReplyEvent`, read its acknowledgement, close. The event UUID sent
//! here is later passed to the version endpoint to tie the version record
//! to this edit.

use std::time::Duration;

use futures::{SinkExt, StreamExt};
use reqwest::Url;
use serde::Serialize;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::tungstenite::http::header::{ORIGIN, USER_AGENT};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, warn};
use uuid::Uuid;

use fip_action_core::error::{AppError, ErrorKind};
use fip_action_core::result::AppResult;
use fip_action_core::types::wizard::VERSION_REPLY_PATH;

/// Subscription topic for project-level edits.
pub const SUBSCRIPTION_TOPIC: &str = "Project";

/// Socket URL with the authentication query parameters the server expects.
pub fn socket_url(ws_url: &str, token: &str, project_uuid: &str) -> AppResult<Url> {
    Url::parse_with_params(
        ws_url,
        &[
            ("Authorization", format!("Bearer {token}")),
            ("subscription", SUBSCRIPTION_TOPIC.to_string()),
            ("identifier", project_uuid.to_string()),
        ],
    )
    .map_err(|e| {
        AppError::with_source(
            ErrorKind::Realtime,
            format!("Invalid WebSocket URL '{ws_url}': {e}"),
            e,
        )
    })
}

/// `Origin` header value for an API URL.
pub fn derive_origin(api_url: &str) -> String {
    api_url.replace("wizard-api", "wizard")
}

/// `SetContent_ClientProjectMessage` carrying a single `SetReplyEvent`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum SetReplyMessage {
    /// Set reply content.
    #[serde(rename = "SetContent_ClientProjectMessage")]
    SetContent(SetReplyEvent),
}

/// A reply mutation at a questionnaire path.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename = "SetReplyEvent")]
pub struct SetReplyEvent {
    /// Event UUID, reused as `eventUuid` of the version record.
    pub uuid: String,
    /// Questionnaire reply path.
    pub path: String,
    /// New reply value.
    pub value: ReplyValue,
}

/// Reply value payload.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum ReplyValue {
    /// Plain string answer.
    StringReply {
        /// Answer text.
        value: String,
    },
}

impl SetReplyMessage {
    /// Set the FIP version reply to `version` under a fresh event UUID.
    pub fn version(version: &str) -> Self {
        Self::SetContent(SetReplyEvent {
            uuid: Uuid::new_v4().to_string(),
            path: VERSION_REPLY_PATH.to_string(),
            value: ReplyValue::StringReply {
                value: version.to_string(),
            },
        })
    }

    /// UUID correlating this edit with later REST calls.
    pub fn event_uuid(&self) -> &str {
        match self {
            Self::SetContent(event) => &event.uuid,
        }
    }
}

/// Lifecycle of a [`RealtimeSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Socket open, greeting not read yet.
    Connected,
    /// Server greeting consumed.
    AckReceived,
    /// Mutation written.
    MutationSent,
    /// Mutation acknowledged.
    ReplyReceived,
    /// Socket closed.
    Closed,
}

type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// A single-use realtime connection.
///
/// [`RealtimeSession::set_reply`] consumes the session and closes the socket
/// on every path, including failures half-way through the exchange.
pub struct RealtimeSession {
    socket: Socket,
    state: SessionState,
    timeout: Duration,
}

impl RealtimeSession {
    /// Open the socket with the given `Origin` and `User-Agent`.
    pub async fn connect(
        url: &Url,
        origin: &str,
        user_agent: &str,
        timeout: Duration,
    ) -> AppResult<Self> {
        let mut request = url.as_str().into_client_request().map_err(|e| {
            AppError::with_source(
                ErrorKind::Realtime,
                format!("Invalid WebSocket request: {e}"),
                e,
            )
        })?;
        let headers = request.headers_mut();
        headers.insert(ORIGIN, header_value(origin)?);
        headers.insert(USER_AGENT, header_value(user_agent)?);

        let (socket, _response) =
            tokio::time::timeout(timeout, tokio_tungstenite::connect_async(request))
                .await
                .map_err(|_| AppError::realtime("Timed out connecting to WebSocket"))?
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Realtime,
                        format!("WebSocket connection failed: {e}"),
                        e,
                    )
                })?;

        debug!(host = ?url.host_str(), "Realtime session connected");
        Ok(Self {
            socket,
            state: SessionState::Connected,
            timeout,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run the greeting/mutation/acknowledgement exchange, then close.
    pub async fn set_reply(mut self, message: &SetReplyMessage) -> AppResult<()> {
        let outcome = self.exchange(message).await;
        self.close().await;
        outcome
    }

    async fn exchange(&mut self, message: &SetReplyMessage) -> AppResult<()> {
        self.receive("handshake").await?;
        self.state = SessionState::AckReceived;

        let payload = serde_json::to_string(message)?;
        tokio::time::timeout(self.timeout, self.socket.send(Message::text(payload)))
            .await
            .map_err(|_| AppError::realtime("Timed out sending realtime event"))?
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Realtime,
                    format!("Failed to send realtime event: {e}"),
                    e,
                )
            })?;
        self.state = SessionState::MutationSent;

        self.receive("event acknowledgement").await?;
        self.state = SessionState::ReplyReceived;
        Ok(())
    }

    /// Read the next data frame; control frames are skipped.
    async fn receive(&mut self, what: &str) -> AppResult<String> {
        loop {
            let frame = tokio::time::timeout(self.timeout, self.socket.next())
                .await
                .map_err(|_| AppError::realtime(format!("Timed out waiting for {what}")))?;

            match frame {
                Some(Ok(Message::Text(text))) => return Ok(text.as_str().to_string()),
                Some(Ok(Message::Binary(bytes))) => {
                    return Ok(String::from_utf8_lossy(&bytes).into_owned());
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => continue,
                Some(Ok(Message::Close(_))) | None => {
                    return Err(AppError::realtime(format!(
                        "WebSocket closed before {what}"
                    )));
                }
                Some(Err(e)) => {
                    return Err(AppError::with_source(
                        ErrorKind::Realtime,
                        format!("WebSocket error while waiting for {what}: {e}"),
                        e,
                    ));
                }
            }
        }
    }

    async fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        if let Err(e) = self.socket.close(None).await {
            warn!(error = %e, "Failed to close realtime session cleanly");
        }
        self.state = SessionState::Closed;
    }
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        AppError::with_source(
            ErrorKind::Realtime,
            format!("Invalid WebSocket header value '{value}': {e}"),
            e,
        )
    })
}

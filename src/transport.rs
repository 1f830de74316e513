//! HTTP client for the site's chatbot endpoints.
//!
//! Replies are read as untyped JSON and the fields the widget cares about
//! are picked out with JavaScript-style truthiness, so any response shape
//! the backend produces is accepted.

use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

use crate::error::TransportError;
use crate::events::Sender;
use crate::session::UserInfo;

/// Body of `POST /api/chatbot/message`
#[derive(Debug, Clone, Serialize)]
pub struct MessageRequest {
    pub message: String,
    pub conversation_id: String,
    pub user_info: UserInfo,
}

/// Reply to a chat message
#[derive(Debug, Clone, PartialEq)]
pub struct MessageResponse {
    pub success: bool,
    pub bot_response: Option<String>,
    pub quote_created: bool,
    /// Full response body as received
    pub raw: Value,
}

impl MessageResponse {
    pub fn from_value(raw: Value) -> Self {
        Self {
            success: is_truthy(raw.get("success")),
            bot_response: raw.get("bot_response").and_then(text_of),
            quote_created: is_truthy(raw.get("quote_created")),
            raw,
        }
    }
}

/// One stored message from the history endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub message: String,
    pub sender: Sender,
}

/// Reply from `GET /api/chatbot/history/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HistoryResponse {
    pub success: bool,
    pub messages: Vec<HistoryEntry>,
}

impl HistoryResponse {
    pub fn from_value(raw: &Value) -> Self {
        let messages = raw
            .get("messages")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| {
                        let message = entry.get("message").and_then(text_of)?;
                        let sender = entry
                            .get("sender")
                            .and_then(Value::as_str)
                            .map(Sender::from_wire)
                            .unwrap_or(Sender::Bot);
                        Some(HistoryEntry { message, sender })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            success: is_truthy(raw.get("success")),
            messages,
        }
    }
}

/// JavaScript truthiness: `null`, `false`, `0`, `""` and missing are false
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Printable text of a scalar; empty strings and non-scalars read as absent
fn text_of(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Backend used by the chat widget
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one chat message; no retry
    async fn send_message(&self, request: MessageRequest) -> Result<MessageResponse, TransportError>;

    /// Fetch prior messages for a conversation
    async fn fetch_history(&self, conversation_id: &str) -> Result<HistoryResponse, TransportError>;
}

/// reqwest-backed transport
#[derive(Clone)]
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| TransportError::Client(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(TransportError::Client(format!("'{base_url}' cannot be used as a base URL")));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, TransportError> {
        let status = response.status();
        let body = response.text().await?;
        tracing::debug!(%status, bytes = body.len(), "chatbot response received");
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send_message(&self, request: MessageRequest) -> Result<MessageResponse, TransportError> {
        let url = self.endpoint(&["api", "chatbot", "message"]);
        tracing::debug!(%url, conversation_id = %request.conversation_id, "sending chat message");

        let response = self
            .client
            .post(url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        Ok(MessageResponse::from_value(Self::read_json(response).await?))
    }

    async fn fetch_history(&self, conversation_id: &str) -> Result<HistoryResponse, TransportError> {
        let url = self.endpoint(&["api", "chatbot", "history", conversation_id]);
        tracing::debug!(%url, "fetching conversation history");

        let response = self.client.get(url).send().await?;
        Ok(HistoryResponse::from_value(&Self::read_json(response).await?))
    }
}

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::error::TransportError;
use crate::transport::{HistoryResponse, MessageResponse};

/// Events delivered to the chat widget from background tasks.
///
/// Every network result comes back through one channel so the widget
/// applies them in a single, well-defined order.
#[derive(Debug)]
pub enum WidgetEvent {
    /// Reply to the message sent with `send_message`
    Reply(Result<MessageResponse, TransportError>),

    /// Result of the startup history fetch
    History(Result<HistoryResponse, TransportError>),
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    /// Backend history uses `"user"` and `"bot"`; anything unknown is shown as the bot
    pub fn from_wire(value: &str) -> Self {
        if value.eq_ignore_ascii_case("user") {
            Sender::User
        } else {
            Sender::Bot
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Bot => "OrbitX AI",
        }
    }
}

/// A rendered chat message; lives only as long as the widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }
}

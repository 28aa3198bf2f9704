use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An incoming message from a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomingMessage {
    /// Channel name (e.g. "telegram").
    pub channel: String,
    /// Platform-specific conversation ID (e.g. Telegram chat_id).
    pub chat_ref: String,
    /// Platform-specific ID of this message within the chat.
    pub message_ref: String,
    /// Message text content, if any.
    pub text: Option<String>,
    /// Who sent the message.
    pub sender: Author,
    /// The message this one replies to, if any.
    #[serde(default)]
    pub reply_to: Option<ReplyContext>,
    pub timestamp: DateTime<Utc>,
}

impl IncomingMessage {
    /// Message text, or an empty string when the message carries none.
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }
}

/// Identity fields of a message author, as reported by the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Public handle without the leading `@`.
    pub handle: Option<String>,
    /// Platform-specific numeric user ID, as a string.
    pub id: Option<String>,
}

impl Author {
    /// Preferred identity: the handle, else the numeric ID.
    pub fn identity(&self) -> Option<String> {
        self.handle
            .as_deref()
            .filter(|h| !h.is_empty())
            .or(self.id.as_deref())
            .map(str::to_string)
    }
}

/// Metadata about the message being replied to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyContext {
    pub message_ref: String,
    pub text: Option<String>,
    pub author: Author,
}

/// An outgoing message to send back through a channel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub text: String,
    /// Platform-specific target for routing (e.g. Telegram chat_id).
    #[serde(default)]
    pub reply_target: Option<String>,
    /// Message to thread the reply under, if the platform supports it.
    #[serde(default)]
    pub reply_to: Option<String>,
}

impl OutgoingMessage {
    /// Build a reply addressed to the chat and message of `incoming`.
    pub fn reply(incoming: &IncomingMessage, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_target: Some(incoming.chat_ref.clone()),
            reply_to: Some(incoming.message_ref.clone()),
        }
    }
}

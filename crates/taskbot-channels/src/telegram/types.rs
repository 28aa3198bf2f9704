//! Telegram Bot API deserialization types and conversion to core messages.

use serde::Deserialize;
use taskbot_core::message::{Author, IncomingMessage, ReplyContext};

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUpdate {
    pub update_id: i64,
    pub message: Option<TgMessage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgMessage {
    pub message_id: i64,
    pub from: Option<TgUser>,
    pub chat: TgChat,
    pub text: Option<String>,
    /// Only one level deep: Telegram omits the nested reply's own reply.
    pub reply_to_message: Option<Box<TgMessage>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgUser {
    pub id: i64,
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgChat {
    pub id: i64,
    /// Chat type: "private", "group", "supergroup", or "channel".
    #[serde(default, rename = "type")]
    pub chat_type: String,
}

impl TgUser {
    fn author(&self) -> Author {
        Author {
            handle: self.username.clone(),
            id: Some(self.id.to_string()),
        }
    }
}

impl TgMessage {
    /// Convert to a core message. Returns `None` for messages without a
    /// sender (channel posts, anonymous admins without a `from`).
    pub(crate) fn into_incoming(self) -> Option<IncomingMessage> {
        let sender = self.from.as_ref()?.author();
        let reply_to = self.reply_to_message.map(|original| {
            let original = *original;
            ReplyContext {
                message_ref: original.message_id.to_string(),
                author: original.from.as_ref().map(TgUser::author).unwrap_or_default(),
                text: original.text,
            }
        });

        Some(IncomingMessage {
            channel: "telegram".to_string(),
            chat_ref: self.chat.id.to_string(),
            message_ref: self.message_id.to_string(),
            text: self.text,
            sender,
            reply_to,
            timestamp: chrono::Utc::now(),
        })
    }
}

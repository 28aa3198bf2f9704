//! Message sending and command registration.

use super::TelegramChannel;
use crate::utils::split_message;
use taskbot_core::error::TaskbotError;
use tracing::{info, warn};

/// Telegram's per-message text limit.
const MAX_MESSAGE_LEN: usize = 4096;

/// Bot commands advertised in the Telegram command menu.
pub(crate) const BOT_COMMANDS: &[(&str, &str)] = &[
    ("start", "Introduction and command list"),
    ("help", "How to create and update tasks"),
    ("tasks", "List all pending tasks"),
    ("mytasks", "List tasks assigned to you"),
];

/// Build the `sendMessage` body for one chunk.
pub(crate) fn send_message_body(
    chat_id: i64,
    text: &str,
    reply_to: Option<i64>,
) -> serde_json::Value {
    let mut body = serde_json::json!({
        "chat_id": chat_id,
        "text": text,
    });
    if let Some(message_id) = reply_to {
        body["reply_parameters"] = serde_json::json!({
            "message_id": message_id,
            "allow_sending_without_reply": true,
        });
    }
    body
}

impl TelegramChannel {
    /// Send a plain text message to a chat, threaded under `reply_to` if given.
    pub(crate) async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        reply_to: Option<i64>,
    ) -> Result<(), TaskbotError> {
        let url = format!("{}/sendMessage", self.base_url);

        for chunk in split_message(text, MAX_MESSAGE_LEN) {
            let body = send_message_body(chat_id, chunk, reply_to);

            let resp = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| TaskbotError::Channel(format!("telegram send failed: {e}")))?;

            let status = resp.status();
            if !status.is_success() {
                let error_text = resp.text().await.unwrap_or_default();
                return Err(TaskbotError::Channel(format!(
                    "telegram send failed ({status}): {error_text}"
                )));
            }
        }

        Ok(())
    }

    /// Register bot commands with Telegram so users see an autocomplete menu.
    /// Best-effort: logs failures but does not propagate errors.
    pub(crate) async fn register_commands(&self) {
        let commands: Vec<serde_json::Value> = BOT_COMMANDS
            .iter()
            .map(|(command, description)| {
                serde_json::json!({ "command": command, "description": description })
            })
            .collect();
        let body = serde_json::json!({ "commands": commands });

        let url = format!("{}/setMyCommands", self.base_url);
        match self.client.post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {
                info!("registered Telegram bot commands");
            }
            Ok(resp) => {
                let body = resp.text().await.unwrap_or_default();
                warn!("failed to register Telegram bot commands: {body}");
            }
            Err(e) => {
                warn!("failed to register Telegram bot commands: {e}");
            }
        }
    }
}

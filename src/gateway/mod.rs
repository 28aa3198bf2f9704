//! Gateway: the main event loop connecting channels to the task lifecycle.
//!
//! Messages from one chat are handled one at a time in arrival order;
//! different chats are handled concurrently.

use crate::commands::{self, Command};
use crate::lifecycle::Lifecycle;
use std::collections::HashMap;
use std::sync::Arc;
use taskbot_core::{
    message::{IncomingMessage, OutgoingMessage},
    traits::Channel,
};
use taskbot_memory::Store;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info, warn};

/// The central gateway that routes messages between channels and the lifecycle engine.
pub struct Gateway {
    channels: HashMap<String, Arc<dyn Channel>>,
    lifecycle: Lifecycle<Store>,
    /// Chats with a message in flight. Later messages for the chat queue here.
    active_chats: Mutex<HashMap<String, Vec<IncomingMessage>>>,
}

impl Gateway {
    /// Create a new gateway.
    pub fn new(channels: HashMap<String, Arc<dyn Channel>>, lifecycle: Lifecycle<Store>) -> Self {
        Self {
            channels,
            lifecycle,
            active_chats: Mutex::new(HashMap::new()),
        }
    }

    /// Run the main event loop until Ctrl-C.
    pub async fn run(self: Arc<Self>) -> anyhow::Result<()> {
        info!(
            "Taskbot gateway running | channels: {}",
            self.channels.keys().cloned().collect::<Vec<_>>().join(", "),
        );

        let (tx, mut rx) = mpsc::channel::<IncomingMessage>(256);

        for (name, channel) in &self.channels {
            let mut channel_rx = channel
                .start()
                .await
                .map_err(|e| anyhow::anyhow!("failed to start channel {name}: {e}"))?;
            let tx = tx.clone();
            let channel_name = name.clone();

            tokio::spawn(async move {
                while let Some(msg) = channel_rx.recv().await {
                    if tx.send(msg).await.is_err() {
                        info!("gateway receiver dropped, stopping {channel_name} forwarder");
                        break;
                    }
                }
            });

            info!("Channel started: {name}");
        }

        drop(tx);

        loop {
            tokio::select! {
                incoming = rx.recv() => {
                    let Some(incoming) = incoming else {
                        warn!("all channels closed");
                        break;
                    };
                    let gw = self.clone();
                    tokio::spawn(async move {
                        gw.dispatch_message(incoming).await;
                    });
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Received shutdown signal");
                    break;
                }
            }
        }

        self.shutdown().await;
        Ok(())
    }

    /// Dispatch a message: queue it if its chat is busy, otherwise process.
    async fn dispatch_message(self: Arc<Self>, incoming: IncomingMessage) {
        let chat_key = format!("{}:{}", incoming.channel, incoming.chat_ref);

        {
            let mut active = self.active_chats.lock().await;
            if let Some(queue) = active.get_mut(&chat_key) {
                debug!("queued message {} for busy chat {chat_key}", incoming.message_ref);
                queue.push(incoming);
                return;
            }
            active.insert(chat_key.clone(), Vec::new());
        }

        self.handle_message(&incoming).await;

        // Drain messages that arrived for this chat in the meantime.
        loop {
            let next = {
                let mut active = self.active_chats.lock().await;
                match active.get_mut(&chat_key) {
                    Some(queue) if !queue.is_empty() => Some(queue.remove(0)),
                    _ => {
                        active.remove(&chat_key);
                        None
                    }
                }
            };

            match next {
                Some(queued) => self.handle_message(&queued).await,
                None => break,
            }
        }
    }

    /// Route one message to a command or the keyword lifecycle, then reply.
    async fn handle_message(&self, incoming: &IncomingMessage) {
        let Some(text) = incoming.text.as_deref() else {
            debug!("ignoring message {} without text", incoming.message_ref);
            return;
        };

        let reply = if text.starts_with('/') {
            match Command::parse(text) {
                Some(cmd) => commands::handle(cmd, &self.lifecycle, incoming).await,
                None => {
                    debug!("ignoring unknown command in chat {}", incoming.chat_ref);
                    None
                }
            }
        } else {
            self.lifecycle.handle(incoming).await
        };

        if let Some(reply) = reply {
            self.send_text(incoming, reply).await;
        }
    }

    /// Send a plain text reply into the chat of `incoming`.
    async fn send_text(&self, incoming: &IncomingMessage, text: String) {
        let msg = OutgoingMessage::reply(incoming, text);

        match self.channels.get(&incoming.channel) {
            Some(channel) => {
                if let Err(e) = channel.send(msg).await {
                    error!("failed to send message: {e}");
                }
            }
            None => warn!("no channel named {} for reply", incoming.channel),
        }
    }

    /// Graceful shutdown: stop channels, close the store.
    async fn shutdown(&self) {
        info!("Shutting down...");

        for (name, channel) in &self.channels {
            if let Err(e) = channel.stop().await {
                warn!("failed to stop channel {name}: {e}");
            }
        }

        self.lifecycle.store().close().await;

        info!("Shutdown complete.");
    }
}

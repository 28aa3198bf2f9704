//! Task lifecycle engine. Turns a classified message into a store
//! operation and a reply.
//!
//! The engine keeps no state between messages; everything lives in the
//! [`TaskStore`]. Every path that acts produces exactly one reply, and
//! `Intent::None` produces none.

mod format;


use taskbot_core::{
    config::DuplicatePolicy,
    due_date,
    error::TaskbotError,
    intent::{Intent, KeywordTable},
    message::IncomingMessage,
    task::{NewTask, Task, TaskStatus},
    traits::TaskStore,
};
use tracing::{debug, info, warn};

/// Which listing was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListScope {
    All,
    Mine,
}

/// Result of a successful operation, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created {
        id: i64,
        text: String,
        assignee: Option<String>,
        due_date: Option<String>,
    },
    /// Create on an already-tracked message under [`DuplicatePolicy::Upsert`].
    Refreshed {
        id: i64,
        text: String,
        assignee: Option<String>,
        due_date: Option<String>,
    },
    StatusChanged(TaskStatus),
    Listing { scope: ListScope, tasks: Vec<Task> },
}

/// Stateless orchestrator over a task store.
pub struct Lifecycle<S> {
    store: S,
    keywords: KeywordTable,
    duplicate_policy: DuplicatePolicy,
}

impl<S: TaskStore> Lifecycle<S> {
    pub fn new(store: S, keywords: KeywordTable, duplicate_policy: DuplicatePolicy) -> Self {
        Self {
            store,
            keywords,
            duplicate_policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Classify a free-text message and act on it.
    pub async fn handle(&self, msg: &IncomingMessage) -> Option<String> {
        let intent = self.keywords.classify(msg.text(), msg.reply_to.is_some());
        self.run(intent, msg).await
    }

    /// Act on an already-known intent (used by bot commands).
    pub async fn run(&self, intent: Intent, msg: &IncomingMessage) -> Option<String> {
        if intent == Intent::None {
            debug!("no intent in message {} of chat {}", msg.message_ref, msg.chat_ref);
            return None;
        }

        let reply = match self.apply(intent, msg).await {
            Ok(outcome) => format::outcome(&outcome),
            Err(e) => {
                warn!(
                    "{intent:?} failed in chat {} (message {}): {e}",
                    msg.chat_ref, msg.message_ref
                );
                format::failure(&e).to_string()
            }
        };
        Some(reply)
    }

    /// Perform the store operation for `intent`.
    pub async fn apply(
        &self,
        intent: Intent,
        msg: &IncomingMessage,
    ) -> Result<Outcome, TaskbotError> {
        match intent {
            Intent::Create => self.create(msg).await,
            Intent::MarkDone | Intent::MarkInProgress | Intent::MarkWaiting => {
                let status = intent
                    .target_status()
                    .ok_or_else(|| TaskbotError::Validation(format!("{intent:?} has no status")))?;
                self.set_status(msg, status).await
            }
            Intent::ListMine => self.list_mine(msg).await,
            Intent::ListAll => {
                let tasks = self.store.list_pending().await?;
                Ok(Outcome::Listing {
                    scope: ListScope::All,
                    tasks,
                })
            }
            Intent::None => Err(TaskbotError::Validation("no intent to apply".into())),
        }
    }

    async fn create(&self, msg: &IncomingMessage) -> Result<Outcome, TaskbotError> {
        let reply = msg
            .reply_to
            .as_ref()
            .ok_or_else(|| TaskbotError::Validation("create requires a reply".into()))?;

        let text = match reply.text.as_deref() {
            Some(t) if !t.trim().is_empty() => t.to_string(),
            _ => {
                return Err(TaskbotError::Validation(format!(
                    "replied-to message {} has no text",
                    reply.message_ref
                )))
            }
        };
        let assignee = reply.author.identity();
        let due_date = due_date::extract(msg.text());

        if self.duplicate_policy == DuplicatePolicy::Upsert {
            if let Some(existing) = self
                .store
                .find_by_message(&msg.chat_ref, &reply.message_ref)
                .await?
            {
                let updated = self
                    .store
                    .update_details(
                        existing.id,
                        &text,
                        assignee.as_deref(),
                        due_date.as_deref(),
                    )
                    .await?;
                if !updated {
                    return Err(TaskbotError::NotFound(format!("task #{}", existing.id)));
                }
                info!("task #{} refreshed in chat {}", existing.id, msg.chat_ref);
                return Ok(Outcome::Refreshed {
                    id: existing.id,
                    text,
                    assignee,
                    due_date,
                });
            }
        }

        let id = self
            .store
            .create(NewTask {
                text: text.clone(),
                assignee: assignee.clone(),
                due_date: due_date.clone(),
                chat_ref: msg.chat_ref.clone(),
                message_ref: reply.message_ref.clone(),
            })
            .await?;

        info!(
            "task #{id} created in chat {} for {}",
            msg.chat_ref,
            assignee.as_deref().unwrap_or("nobody")
        );
        Ok(Outcome::Created {
            id,
            text,
            assignee,
            due_date,
        })
    }

    async fn set_status(
        &self,
        msg: &IncomingMessage,
        status: TaskStatus,
    ) -> Result<Outcome, TaskbotError> {
        let reply = msg
            .reply_to
            .as_ref()
            .ok_or_else(|| TaskbotError::NotFound("status update without a reply".into()))?;

        if !self
            .store
            .set_status(&msg.chat_ref, &reply.message_ref, status)
            .await?
        {
            return Err(TaskbotError::NotFound(format!(
                "no task for message {} in chat {}",
                reply.message_ref, msg.chat_ref
            )));
        }

        info!(
            "task for message {} in chat {} is now {status}",
            reply.message_ref, msg.chat_ref
        );
        Ok(Outcome::StatusChanged(status))
    }

    async fn list_mine(&self, msg: &IncomingMessage) -> Result<Outcome, TaskbotError> {
        let tasks = match msg.sender.identity() {
            Some(me) => self.store.list_by_assignee(&me).await?,
            None => Vec::new(),
        };
        Ok(Outcome::Listing {
            scope: ListScope::Mine,
            tasks,
        })
    }
}

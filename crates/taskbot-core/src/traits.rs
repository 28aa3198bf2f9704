use crate::{
    error::TaskbotError,
    message::{IncomingMessage, OutgoingMessage},
    task::{NewTask, Task, TaskStatus},
};
use async_trait::async_trait;

/// Durable table of tasks.
///
/// Every operation touches at most one row and is atomic on its own.
/// Implementations acquire whatever connection they need per call and
/// release it before returning.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a pending task stamped with the current time; returns its id.
    async fn create(&self, task: NewTask) -> Result<i64, TaskbotError>;

    /// Exact lookup on the natural key. With duplicates, the oldest row wins.
    async fn find_by_message(
        &self,
        chat_ref: &str,
        message_ref: &str,
    ) -> Result<Option<Task>, TaskbotError>;

    /// Overwrite the status of every row with this key.
    /// Returns `true` iff at least one row matched.
    async fn set_status(
        &self,
        chat_ref: &str,
        message_ref: &str,
        status: TaskStatus,
    ) -> Result<bool, TaskbotError>;

    /// Overwrite text, assignee and due date of one task.
    /// Returns `true` iff the task exists.
    async fn update_details(
        &self,
        id: i64,
        text: &str,
        assignee: Option<&str>,
        due_date: Option<&str>,
    ) -> Result<bool, TaskbotError>;

    /// All pending tasks, in insertion order.
    async fn list_pending(&self) -> Result<Vec<Task>, TaskbotError>;

    /// All tasks with exactly this assignee, in insertion order.
    async fn list_by_assignee(&self, assignee: &str) -> Result<Vec<Task>, TaskbotError>;
}

/// Messaging transport.
///
/// Every messaging platform implements this trait to receive and send
/// messages.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Human-readable channel name.
    fn name(&self) -> &str;

    /// Start listening for incoming messages.
    /// Returns a receiver that yields incoming messages.
    async fn start(&self) -> Result<tokio::sync::mpsc::Receiver<IncomingMessage>, TaskbotError>;

    /// Send a response back through this channel.
    async fn send(&self, message: OutgoingMessage) -> Result<(), TaskbotError>;

    /// Graceful shutdown.
    async fn stop(&self) -> Result<(), TaskbotError>;
}

//! The task entity and its status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TaskbotError;

/// Lifecycle status of a task. Any status may be overwritten by any other.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Waiting,
    Done,
}

impl TaskStatus {
    /// Value persisted in the store.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }

    /// Human-readable label for chat replies.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in progress",
            Self::Waiting => "waiting",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = TaskbotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            // Older rows written with a space.
            "in_progress" | "in progress" => Ok(Self::InProgress),
            "waiting" => Ok(Self::Waiting),
            "done" => Ok(Self::Done),
            other => Err(TaskbotError::Storage(format!(
                "unknown task status '{other}'"
            ))),
        }
    }
}

/// A persisted task, keyed naturally by `(chat_ref, message_ref)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    pub assignee: Option<String>,
    pub status: TaskStatus,
    /// `YYYY-MM-DD` as found in the creating message, never validated.
    pub due_date: Option<String>,
    /// UTC, `YYYY-MM-DD HH:MM:SS`.
    pub created_at: String,
    pub chat_ref: String,
    /// The message describing the task, not the command that created it.
    pub message_ref: String,
}

/// Fields supplied when creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub text: String,
    pub assignee: Option<String>,
    pub due_date: Option<String>,
    pub chat_ref: String,
    pub message_ref: String,
}

//! Reply texts.

use super::{ListScope, Outcome};
use taskbot_core::{
    error::TaskbotError,
    task::{Task, TaskStatus},
};

pub const CREATE_NO_TEXT: &str = "Could not create task: the replied-to message has no text.";
pub const STATUS_FAILED: &str = "Could not update task status.";
pub const OPERATION_FAILED: &str = "Operation failed. Please try again later.";
pub const NO_ACTIVE_TASKS: &str = "No active tasks.";
pub const NO_TASKS_FOR_YOU: &str = "No tasks assigned to you.";

/// Render a successful outcome.
pub fn outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Created {
            id,
            text,
            assignee,
            due_date,
        } => task_summary(
            &format!("Task #{id} created:"),
            text,
            assignee.as_deref(),
            due_date.as_deref(),
        ),
        Outcome::Refreshed {
            id,
            text,
            assignee,
            due_date,
        } => task_summary(
            &format!("Task #{id} updated:"),
            text,
            assignee.as_deref(),
            due_date.as_deref(),
        ),
        Outcome::StatusChanged(status) => status_changed(*status).to_string(),
        Outcome::Listing { scope, tasks } => listing(*scope, tasks),
    }
}

/// The single reply for a failed operation.
pub fn failure(err: &TaskbotError) -> &'static str {
    match err {
        TaskbotError::Validation(_) => CREATE_NO_TEXT,
        TaskbotError::NotFound(_) => STATUS_FAILED,
        _ => OPERATION_FAILED,
    }
}

fn task_summary(
    header: &str,
    text: &str,
    assignee: Option<&str>,
    due_date: Option<&str>,
) -> String {
    let mut out = format!(
        "{header}\n{text}\nAssigned to: {}",
        assignee.unwrap_or("unassigned")
    );
    if let Some(due) = due_date {
        out.push_str(&format!("\nDue: {due}"));
    }
    out
}

fn status_changed(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Done => "Task status updated: done ✅",
        TaskStatus::InProgress => "Task status updated: in progress 🔄",
        TaskStatus::Waiting => "Task status updated: waiting ⏸️",
        TaskStatus::Pending => "Task status updated: pending",
    }
}

fn listing(scope: ListScope, tasks: &[Task]) -> String {
    let (header, empty) = match scope {
        ListScope::All => ("Pending tasks:", NO_ACTIVE_TASKS),
        ListScope::Mine => ("Your tasks:", NO_TASKS_FOR_YOU),
    };
    if tasks.is_empty() {
        return empty.to_string();
    }

    let entries: Vec<String> = tasks.iter().map(task_entry).collect();
    format!("{header}\n\n{}", entries.join("\n\n"))
}

fn task_entry(task: &Task) -> String {
    format!(
        "#{}: {}\nStatus: {}\nDue: {}\nCreated: {}",
        task.id,
        task.text,
        task.status.label(),
        task.due_date.as_deref().unwrap_or("not set"),
        task.created_at
    )
}

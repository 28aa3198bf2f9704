//! Task CRUD keyed by `(chat_ref, message_ref)`.

use super::Store;
use async_trait::async_trait;
use taskbot_core::{
    error::TaskbotError,
    task::{NewTask, Task, TaskStatus},
    traits::TaskStore,
};

/// Row shape: (id, text, assignee, status, due_date, created_at, chat_ref, message_ref)
type TaskRow = (
    i64,
    String,
    Option<String>,
    String,
    Option<String>,
    String,
    String,
    String,
);

const SELECT_TASK: &str = "SELECT id, text, assignee, status, due_date, created_at, chat_ref, message_ref \
                           FROM tasks";

fn into_task(row: TaskRow) -> Result<Task, TaskbotError> {
    let (id, text, assignee, status, due_date, created_at, chat_ref, message_ref) = row;
    Ok(Task {
        id,
        text,
        assignee,
        status: status.parse()?,
        due_date,
        created_at,
        chat_ref,
        message_ref,
    })
}

/// Current UTC time in the persisted `created_at` format.
fn now_stamp() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

#[async_trait]
impl TaskStore for Store {
    async fn create(&self, task: NewTask) -> Result<i64, TaskbotError> {
        let result = sqlx::query(
            "INSERT INTO tasks (text, assignee, status, due_date, created_at, chat_ref, message_ref) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&task.text)
        .bind(&task.assignee)
        .bind(TaskStatus::Pending.as_str())
        .bind(&task.due_date)
        .bind(now_stamp())
        .bind(&task.chat_ref)
        .bind(&task.message_ref)
        .execute(&self.pool)
        .await
        .map_err(|e| TaskbotError::Storage(format!("create task failed: {e}")))?;

        Ok(result.last_insert_rowid())
    }

    async fn find_by_message(
        &self,
        chat_ref: &str,
        message_ref: &str,
    ) -> Result<Option<Task>, TaskbotError> {
        let row: Option<TaskRow> = sqlx::query_as(&format!(
            "{SELECT_TASK} WHERE chat_ref = ? AND message_ref = ? ORDER BY id ASC LIMIT 1"
        ))
        .bind(chat_ref)
        .bind(message_ref)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| TaskbotError::Storage(format!("find task failed: {e}")))?;

        row.map(into_task).transpose()
    }

    async fn set_status(
        &self,
        chat_ref: &str,
        message_ref: &str,
        status: TaskStatus,
    ) -> Result<bool, TaskbotError> {
        let result =
            sqlx::query("UPDATE tasks SET status = ? WHERE chat_ref = ? AND message_ref = ?")
                .bind(status.as_str())
                .bind(chat_ref)
                .bind(message_ref)
                .execute(&self.pool)
                .await
                .map_err(|e| TaskbotError::Storage(format!("set status failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_details(
        &self,
        id: i64,
        text: &str,
        assignee: Option<&str>,
        due_date: Option<&str>,
    ) -> Result<bool, TaskbotError> {
        let result =
            sqlx::query("UPDATE tasks SET text = ?, assignee = ?, due_date = ? WHERE id = ?")
                .bind(text)
                .bind(assignee)
                .bind(due_date)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| TaskbotError::Storage(format!("update task failed: {e}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_pending(&self) -> Result<Vec<Task>, TaskbotError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("{SELECT_TASK} WHERE status = ? ORDER BY id ASC"))
                .bind(TaskStatus::Pending.as_str())
                .fetch_all(&self.pool)
                .await
                .map_err(|e| TaskbotError::Storage(format!("list pending failed: {e}")))?;

        rows.into_iter().map(into_task).collect()
    }

    async fn list_by_assignee(&self, assignee: &str) -> Result<Vec<Task>, TaskbotError> {
        let rows: Vec<TaskRow> =
            sqlx::query_as(&format!("{SELECT_TASK} WHERE assignee = ? ORDER BY id ASC"))
                .bind(assignee)
                .fetch_all(&self.pool)
                .await
                .map_err(|e| TaskbotError::Storage(format!("list by assignee failed: {e}")))?;

        rows.into_iter().map(into_task).collect()
    }
}

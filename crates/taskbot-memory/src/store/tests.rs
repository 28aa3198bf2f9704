use super::Store;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::collections::HashSet;
use std::str::FromStr;
use taskbot_core::config::MemoryConfig;
use taskbot_core::error::TaskbotError;
use taskbot_core::task::{NewTask, TaskStatus};
use taskbot_core::traits::TaskStore;

/// Create an in-memory store for testing.
async fn test_store() -> Store {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await
        .unwrap();
    Store::run_migrations(&pool).await.unwrap();
    Store { pool }
}

fn new_task(text: &str, assignee: Option<&str>, chat: &str, msg: &str) -> NewTask {
    NewTask {
        text: text.to_string(),
        assignee: assignee.map(str::to_string),
        due_date: None,
        chat_ref: chat.to_string(),
        message_ref: msg.to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find_by_message() {
    let store = test_store().await;
    let id = store
        .create(NewTask {
            due_date: Some("2025-06-01".into()),
            ..new_task("Fix the login bug", Some("alice"), "-100", "7")
        })
        .await
        .unwrap();
    assert!(id > 0);

    let task = store.find_by_message("-100", "7").await.unwrap().unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.text, "Fix the login bug");
    assert_eq!(task.assignee.as_deref(), Some("alice"));
    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.due_date.as_deref(), Some("2025-06-01"));
    assert_eq!(task.chat_ref, "-100");
    assert_eq!(task.message_ref, "7");
    // "YYYY-MM-DD HH:MM:SS"
    assert_eq!(task.created_at.len(), 19);
}

#[tokio::test]
async fn test_find_by_message_is_exact() {
    let store = test_store().await;
    store
        .create(new_task("a", Some("bob"), "chat1", "1"))
        .await
        .unwrap();

    assert!(store.find_by_message("chat1", "2").await.unwrap().is_none());
    assert!(store.find_by_message("chat2", "1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_ids_increase() {
    let store = test_store().await;
    let a = store.create(new_task("a", None, "c", "1")).await.unwrap();
    let b = store.create(new_task("b", None, "c", "2")).await.unwrap();
    assert!(b > a);
}

#[tokio::test]
async fn test_create_without_assignee() {
    let store = test_store().await;
    store.create(new_task("orphan", None, "c", "1")).await.unwrap();
    let task = store.find_by_message("c", "1").await.unwrap().unwrap();
    assert!(task.assignee.is_none());
}

#[tokio::test]
async fn test_create_rejects_empty_text() {
    let store = test_store().await;
    let err = store.create(new_task("", None, "c", "1")).await.unwrap_err();
    assert!(matches!(err, TaskbotError::Storage(_)));
    assert!(store.find_by_message("c", "1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_set_status_round_trip_last_write_wins() {
    let store = test_store().await;
    store
        .create(new_task("cycle", Some("alice"), "c", "9"))
        .await
        .unwrap();

    for status in [
        TaskStatus::Done,
        TaskStatus::Pending,
        TaskStatus::Waiting,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ] {
        assert!(store.set_status("c", "9", status).await.unwrap());
        let task = store.find_by_message("c", "9").await.unwrap().unwrap();
        assert_eq!(task.status, status);
    }
}

#[tokio::test]
async fn test_set_status_missing_key() {
    let store = test_store().await;
    assert!(!store
        .set_status("c", "404", TaskStatus::Done)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_duplicate_rows_allowed() {
    let store = test_store().await;
    let first = store.create(new_task("one", None, "c", "5")).await.unwrap();
    let second = store.create(new_task("two", None, "c", "5")).await.unwrap();
    assert_ne!(first, second);

    // Lookup returns the oldest row.
    let found = store.find_by_message("c", "5").await.unwrap().unwrap();
    assert_eq!(found.id, first);

    // Status updates hit every row with the key.
    assert!(store.set_status("c", "5", TaskStatus::Done).await.unwrap());
    assert!(store.list_pending().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_details() {
    let store = test_store().await;
    let id = store
        .create(new_task("old", Some("alice"), "c", "1"))
        .await
        .unwrap();
    store.set_status("c", "1", TaskStatus::Waiting).await.unwrap();

    assert!(store
        .update_details(id, "new", Some("bob"), Some("2030-01-01"))
        .await
        .unwrap());
    let task = store.find_by_message("c", "1").await.unwrap().unwrap();
    assert_eq!(task.id, id);
    assert_eq!(task.text, "new");
    assert_eq!(task.assignee.as_deref(), Some("bob"));
    assert_eq!(task.due_date.as_deref(), Some("2030-01-01"));
    assert_eq!(task.status, TaskStatus::Waiting, "status is untouched");

    assert!(!store.update_details(id + 100, "x", None, None).await.unwrap());
}

#[tokio::test]
async fn test_list_pending_filters_and_is_stable() {
    let store = test_store().await;
    store.create(new_task("a", None, "c", "1")).await.unwrap();
    store.create(new_task("b", None, "c", "2")).await.unwrap();
    store.create(new_task("c", None, "d", "3")).await.unwrap();
    store.set_status("c", "2", TaskStatus::InProgress).await.unwrap();

    let first = store.list_pending().await.unwrap();
    let texts: Vec<&str> = first.iter().map(|t| t.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "c"]);

    let second = store.list_pending().await.unwrap();
    let ids_a: HashSet<i64> = first.iter().map(|t| t.id).collect();
    let ids_b: HashSet<i64> = second.iter().map(|t| t.id).collect();
    assert_eq!(ids_a, ids_b);
}

#[tokio::test]
async fn test_list_by_assignee_exact_match() {
    let store = test_store().await;
    store.create(new_task("a", Some("alice"), "c", "1")).await.unwrap();
    store.create(new_task("b", Some("alice2"), "c", "2")).await.unwrap();
    store.create(new_task("c", Some("Alice"), "c", "3")).await.unwrap();
    store.create(new_task("d", Some("alice"), "c", "4")).await.unwrap();
    store.set_status("c", "4", TaskStatus::Done).await.unwrap();

    let tasks = store.list_by_assignee("alice").await.unwrap();
    let texts: Vec<&str> = tasks.iter().map(|t| t.text.as_str()).collect();
    // Includes tasks in any status.
    assert_eq!(texts, vec!["a", "d"]);

    assert!(store.list_by_assignee("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_migrations_are_idempotent() {
    let store = test_store().await;
    store.create(new_task("kept", None, "c", "1")).await.unwrap();
    Store::run_migrations(store.pool()).await.unwrap();

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM _migrations")
        .fetch_one(store.pool())
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert!(store.find_by_message("c", "1").await.unwrap().is_some());
}

#[tokio::test]
async fn test_new_creates_db_file() {
    let dir = std::env::temp_dir().join(format!("__taskbot_store_test_{}__", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let db_path = dir.join("nested/tasks.db");
    let config = MemoryConfig {
        db_path: db_path.to_string_lossy().to_string(),
        max_connections: 2,
    };

    let store = Store::new(&config).await.unwrap();
    store.create(new_task("persisted", None, "c", "1")).await.unwrap();
    store.close().await;
    assert!(db_path.exists());

    let reopened = Store::new(&config).await.unwrap();
    let task = reopened.find_by_message("c", "1").await.unwrap().unwrap();
    assert_eq!(task.text, "persisted");
    reopened.close().await;

    let _ = std::fs::remove_dir_all(&dir);
}

use thiserror::Error;

/// Top-level error type for Taskbot.
#[derive(Debug, Error)]
pub enum TaskbotError {
    /// Input rejected before anything was written.
    #[error("validation error: {0}")]
    Validation(String),

    /// No task exists for the requested key.
    #[error("not found: {0}")]
    NotFound(String),

    /// Persistence layer unreachable or write rejected.
    #[error("storage error: {0}")]
    Storage(String),

    /// Error from a messaging channel.
    #[error("channel error: {0}")]
    Channel(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

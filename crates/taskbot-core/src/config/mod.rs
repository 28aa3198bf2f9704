mod channels;
mod defaults;


pub use channels::*;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::TaskbotError;
use defaults::*;

/// Environment variable that overrides `channel.telegram.bot_token`.
pub const TOKEN_ENV_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Top-level Taskbot configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub channel: ChannelConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub tasks: TasksConfig,
    #[serde(default)]
    pub keywords: KeywordsConfig,
}

/// General bot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Memory config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_db_path")]
    pub db_path: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            max_connections: default_max_connections(),
        }
    }
}

/// What a create intent does when the replied-to message already has a task.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Insert another row for the same message.
    #[default]
    Allow,
    /// Overwrite text, assignee, and due date of the existing task.
    Upsert,
}

/// Task lifecycle settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Keyword overrides. `None` keeps the built-in English list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordsConfig {
    #[serde(default)]
    pub create: Option<Vec<String>>,
    #[serde(default)]
    pub done: Option<Vec<String>>,
    #[serde(default)]
    pub in_progress: Option<Vec<String>>,
    #[serde(default)]
    pub waiting: Option<Vec<String>>,
    #[serde(default)]
    pub list_mine: Option<Vec<String>>,
    #[serde(default)]
    pub list_all: Option<Vec<String>>,
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist. The bot token from
/// [`TOKEN_ENV_VAR`] replaces whatever the file holds.
pub fn load(path: &str) -> Result<Config, TaskbotError> {
    let mut config = read_file(Path::new(path))?;
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        apply_token_override(&mut config, &token);
    }
    Ok(config)
}

fn read_file(path: &Path) -> Result<Config, TaskbotError> {
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| TaskbotError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    toml::from_str(&content)
        .map_err(|e| TaskbotError::Config(format!("failed to parse config: {}", e)))
}

fn apply_token_override(config: &mut Config, token: &str) {
    let token = token.trim();
    if token.is_empty() {
        return;
    }
    config
        .channel
        .telegram
        .get_or_insert_with(TelegramConfig::default)
        .bot_token = token.to_string();
}

/// Startup check: an enabled Telegram channel must carry a token.
pub fn validate(config: &Config) -> Result<(), TaskbotError> {
    match config.channel.telegram {
        Some(ref tg) if tg.enabled && tg.bot_token.trim().is_empty() => {
            Err(TaskbotError::Config(format!(
                "Telegram is enabled but bot_token is empty. \
                 Set it in config.toml or the {TOKEN_ENV_VAR} env var."
            )))
        }
        Some(ref tg) if tg.enabled => Ok(()),
        _ => Err(TaskbotError::Config(format!(
            "No channels enabled. Set {TOKEN_ENV_VAR} or add [channel.telegram] to config.toml."
        ))),
    }
}

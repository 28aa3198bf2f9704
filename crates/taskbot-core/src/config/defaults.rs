//! Default value functions used by serde for config deserialization.

pub fn default_name() -> String {
    "Taskbot".to_string()
}

pub fn default_data_dir() -> String {
    "~/.taskbot".to_string()
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_db_path() -> String {
    "~/.taskbot/data/tasks.db".to_string()
}

pub fn default_max_connections() -> u32 {
    4
}

pub fn default_true() -> bool {
    true
}

//! # taskbot-core
//!
//! Core types, traits, configuration, and error handling for Taskbot.

pub mod config;
pub mod due_date;
pub mod error;
pub mod intent;
pub mod message;
pub mod task;
pub mod traits;

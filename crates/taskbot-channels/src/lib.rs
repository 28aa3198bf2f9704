//! # taskbot-channels
//!
//! Messaging platform integrations for Taskbot.

pub mod telegram;
pub mod utils;

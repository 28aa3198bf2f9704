//! # taskbot-memory
//!
//! Persistent task store for Taskbot (SQLite-backed).

pub mod store;

pub use store::Store;

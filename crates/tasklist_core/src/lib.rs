//! Core domain logic for the tasklist screen.
//! This crate is the single source of truth for list and persistence rules.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::AppConfig;
pub use db::{StorageError, StorageResult};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::todo::{RowDeleteOutcome, TodoItem, TodoList};
pub use repo::kv_repo::{DetachedKvRepository, KvRepository, SqliteKvRepository};
pub use service::item_persistence::{
    decode_items, encode_items, load_items, save_items, try_load_items, try_save_items,
    PersistenceError, ITEMS_STORAGE_KEY,
};
pub use service::todo_service::TodoService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

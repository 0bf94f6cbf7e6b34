//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value contract used by the persistence adapter.
//! - Provide a detached stand-in for sessions without durable storage.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return schema errors instead of silently creating
//!   tables on unmigrated connections.

pub mod kv_repo;

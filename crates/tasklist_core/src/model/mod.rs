//! Domain model for the to-do list screen.
//!
//! # Responsibility
//! - Define the item/list structures shared by service, FFI and CLI layers.
//!
//! # Invariants
//! - Items are identified by position, not by a stable id.

pub mod todo;

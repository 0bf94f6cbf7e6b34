//! Core use-case services.
//!
//! # Responsibility
//! - Bridge the list store and key-value storage into session APIs.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod item_persistence;
pub mod todo_service;

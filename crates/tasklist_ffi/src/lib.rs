//! Flutter bridge for tasklist core.

pub mod api;

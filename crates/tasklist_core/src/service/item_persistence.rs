//! Persistence adapter for the to-do list.
//!
//! # Responsibility
//! - Encode/decode the list into the single `@items` key-value slot.
//! - Apply the log-and-continue policy for storage failures.
//!
//! # Invariants
//! - The payload is a JSON array of item texts; checked state is never
//!   written, so every load yields unchecked items.
//! - `load_items` and `save_items` never return errors to callers.
//! - Item text never reaches the logs; only counts and error details do.

use crate::db::StorageError;
use crate::model::todo::TodoList;
use crate::repo::kv_repo::KvRepository;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed storage key holding the serialized item texts.
pub const ITEMS_STORAGE_KEY: &str = "@items";

/// Failure while moving the list in or out of storage.
#[derive(Debug)]
pub enum PersistenceError {
    Storage(StorageError),
    MalformedPayload(serde_json::Error),
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::MalformedPayload(err) => write!(f, "malformed stored items payload: {err}"),
            Self::Encode(err) => write!(f, "failed to encode items payload: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::MalformedPayload(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl From<StorageError> for PersistenceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Serializes the list texts into the stored payload shape.
pub fn encode_items(list: &TodoList) -> Result<String, PersistenceError> {
    serde_json::to_string(&list.texts()).map_err(PersistenceError::Encode)
}

/// Parses a stored payload into an unchecked list.
///
/// Blank entries are dropped; any non-string entry fails the whole payload.
pub fn decode_items(payload: &str) -> Result<TodoList, PersistenceError> {
    let texts: Vec<String> =
        serde_json::from_str(payload).map_err(PersistenceError::MalformedPayload)?;
    let stored = texts.len();
    let list = TodoList::from_texts(texts);
    if list.len() != stored {
        warn!(
            "event=items_load module=persistence status=partial dropped_blank={}",
            stored - list.len()
        );
    }
    Ok(list)
}

/// Reads the stored list, surfacing failures.
///
/// Returns `Ok(None)` when the slot has never been written.
pub fn try_load_items<R: KvRepository>(repo: &R) -> Result<Option<TodoList>, PersistenceError> {
    match repo.get(ITEMS_STORAGE_KEY)? {
        Some(payload) => decode_items(&payload).map(Some),
        None => Ok(None),
    }
}

/// Overwrites the stored list, surfacing failures.
pub fn try_save_items<R: KvRepository>(repo: &R, list: &TodoList) -> Result<(), PersistenceError> {
    let payload = encode_items(list)?;
    repo.set(ITEMS_STORAGE_KEY, &payload)?;
    Ok(())
}

/// Hydrates the list at startup.
///
/// # Contract
/// - Missing slot: empty list.
/// - Read or parse failure: empty list, failure logged, nothing surfaced.
pub fn load_items<R: KvRepository>(repo: &R) -> TodoList {
    match try_load_items(repo) {
        Ok(Some(list)) => {
            info!(
                "event=items_load module=persistence status=ok count={}",
                list.len()
            );
            list
        }
        Ok(None) => {
            debug!("event=items_load module=persistence status=empty reason=missing_key");
            TodoList::new()
        }
        Err(err) => {
            error!(
                "event=items_load module=persistence status=error error={}",
                err
            );
            TodoList::new()
        }
    }
}

/// Writes the full list, fire-and-forget.
///
/// Failures are logged and never retried. Returns whether the write landed,
/// for diagnostics only.
pub fn save_items<R: KvRepository>(repo: &R, list: &TodoList) -> bool {
    match try_save_items(repo, list) {
        Ok(()) => {
            debug!(
                "event=items_save module=persistence status=ok count={}",
                list.len()
            );
            true
        }
        Err(err) => {
            error!(
                "event=items_save module=persistence status=error count={} error={}",
                list.len(),
                err
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{decode_items, encode_items, PersistenceError};
    use crate::model::todo::TodoList;

    #[test]
    fn encode_writes_texts_only() {
        let mut list = TodoList::new();
        list.add("X");
        list.add("Y");
        list.toggle(0);

        assert_eq!(encode_items(&list).unwrap(), r#"["X","Y"]"#);
    }

    #[test]
    fn decode_resets_checked_state() {
        let list = decode_items(r#"["a","b"]"#).unwrap();
        assert_eq!(list.texts(), vec!["a", "b"]);
        assert_eq!(list.checked_count(), 0);
    }

    #[test]
    fn decode_rejects_non_string_entries() {
        let err = decode_items(r#"["a", 1]"#).unwrap_err();
        assert!(matches!(err, PersistenceError::MalformedPayload(_)));
    }

    #[test]
    fn decode_rejects_object_payload() {
        let err = decode_items(r#"{"items":["a"]}"#).unwrap_err();
        assert!(matches!(err, PersistenceError::MalformedPayload(_)));
    }

    #[test]
    fn decode_drops_blank_entries() {
        let list = decode_items(r#"["a", "  ", ""]"#).unwrap();
        assert_eq!(list.texts(), vec!["a"]);
    }
}

//! FFI use-case API for the Flutter list screen.
//!
//! # Responsibility
//! - Expose the single-screen to-do operations to Dart via FRB.
//! - Hold one process-wide session so checked state lives as long as the UI.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every list call returns the full, post-mutation row list.
//! - Row indices are the positions returned by the latest response.
//! - Storage failures degrade to an in-memory session; calls never fail.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tasklist_core::db::open_db;
use tasklist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, DetachedKvRepository, KvRepository, RowDeleteOutcome, SqliteKvRepository,
    TodoList, TodoService,
};

static SESSION: Mutex<Option<TodoList>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One rendered row of the list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoRowItem {
    /// Position used by toggle/delete calls.
    pub index: u32,
    pub text: String,
    /// Drives the checkbox icon and the checked row style.
    pub done: bool,
}

/// Response envelope for every list operation.
///
/// Storage problems never fail a call; they only show up in `message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoListResponse {
    /// Full list after the operation.
    pub items: Vec<TodoRowItem>,
    /// Human-readable diagnostics message.
    pub message: String,
}

/// Hydrates the session from storage, discarding any in-memory state.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Storage read failures yield an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_load() -> TodoListResponse {
    let mut session = lock_session();
    run_with_storage(&mut session, &resolve_db_path(), true, |_| {
        "List loaded.".to_string()
    })
}

/// Returns the current rows without touching storage.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_list() -> TodoListResponse {
    let mut session = lock_session();
    match session.as_ref() {
        Some(list) => TodoListResponse {
            items: to_rows(list),
            message: "OK.".to_string(),
        },
        None => run_with_storage(&mut session, &resolve_db_path(), true, |_| {
            "List loaded.".to_string()
        }),
    }
}

/// Adds one item from the text input; blank input is ignored.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String) -> TodoListResponse {
    mutate(|service| {
        if service.add(text) {
            "Item added.".to_string()
        } else {
            "Empty item ignored.".to_string()
        }
    })
}

/// Flips the checkbox of one row.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(index: u32) -> TodoListResponse {
    mutate(|service| {
        if service.toggle(index as usize) {
            "Item toggled.".to_string()
        } else {
            format!("No item at index {index}.")
        }
    })
}

/// Handles the delete icon of one row.
///
/// Deleting a checked row while other rows are checked removes every
/// checked row.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(index: u32) -> TodoListResponse {
    mutate(|service| match service.delete_from_row(index as usize) {
        RowDeleteOutcome::Bulk(count) => format!("Deleted {count} checked item(s)."),
        RowDeleteOutcome::Single => "Item deleted.".to_string(),
        RowDeleteOutcome::Ignored => format!("No item at index {index}."),
    })
}

/// Removes every checked row.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete_checked() -> TodoListResponse {
    mutate(|service| format!("Deleted {} checked item(s).", service.delete_checked()))
}

fn mutate(f: impl FnOnce(&mut TodoService<&dyn KvRepository>) -> String) -> TodoListResponse {
    let mut session = lock_session();
    let hydrate = session.is_none();
    run_with_storage(&mut session, &resolve_db_path(), hydrate, f)
}

/// Runs `f` against the session, backed by the database at `db_path` when
/// it can be opened and by a detached repository otherwise.
///
/// `hydrate` replaces the in-memory list with the stored one first. The
/// session always takes the post-call list, so the UI keeps working when
/// storage is gone.
fn run_with_storage(
    session: &mut Option<TodoList>,
    db_path: &Path,
    hydrate: bool,
    f: impl FnOnce(&mut TodoService<&dyn KvRepository>) -> String,
) -> TodoListResponse {
    let conn = match open_db(db_path) {
        Ok(conn) => Some(conn),
        Err(err) => {
            warn!("event=ffi_storage module=ffi status=detached stage=open error={err}");
            None
        }
    };
    let sqlite = conn
        .as_ref()
        .and_then(|conn| match SqliteKvRepository::try_new(conn) {
            Ok(repo) => Some(repo),
            Err(err) => {
                warn!("event=ffi_storage module=ffi status=detached stage=repo_init error={err}");
                None
            }
        });

    let detached = DetachedKvRepository;
    let repo: &dyn KvRepository = match &sqlite {
        Some(repo) => repo,
        None => &detached,
    };
    let mut service = match session.take() {
        Some(list) if !hydrate => TodoService::with_list(repo, list),
        _ => TodoService::load(repo),
    };

    let mut message = f(&mut service);
    if sqlite.is_none() {
        message.push_str(" Storage unavailable; changes last for this session only.");
    }
    let list = service.snapshot();
    let items = to_rows(&list);
    *session = Some(list);
    TodoListResponse { items, message }
}

fn lock_session() -> MutexGuard<'static, Option<TodoList>> {
    // A panic while holding the lock leaves a list that is still structurally valid.
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_db_path() -> PathBuf {
    AppConfig::from_env().db_path
}

fn to_rows(list: &TodoList) -> Vec<TodoRowItem> {
    list.items()
        .iter()
        .enumerate()
        .map_while(|(index, item)| {
            Some(TodoRowItem {
                index: row_index(index)?,
                text: item.text.clone(),
                done: item.done,
            })
        })
        .collect()
}

/// Row positions past `u32::MAX` cannot be addressed from Dart.
fn row_index(index: usize) -> Option<u32> {
    u32::try_from(index).ok()
}

use std::cell::RefCell;
use std::collections::HashMap;
use tasklist_core::db::{open_db, open_db_in_memory};
use tasklist_core::{
    load_items, save_items, DetachedKvRepository, KvRepository, RowDeleteOutcome,
    SqliteKvRepository, StorageResult, TodoItem, TodoList, TodoService, ITEMS_STORAGE_KEY,
};

/// In-memory repository that records every write.
#[derive(Default)]
struct RecordingRepo {
    slots: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<String>>,
}

impl RecordingRepo {
    fn with_payload(payload: &str) -> Self {
        let repo = Self::default();
        repo.slots
            .borrow_mut()
            .insert(ITEMS_STORAGE_KEY.to_string(), payload.to_string());
        repo
    }

    fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }

    fn last_write(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }
}

impl KvRepository for RecordingRepo {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.slots
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.borrow_mut().push(value.to_string());
        Ok(())
    }
}

fn item(text: &str, done: bool) -> TodoItem {
    TodoItem {
        text: text.to_string(),
        done,
    }
}

fn seeded_service<'a>(
    repo: &'a RecordingRepo,
    entries: &[(&str, bool)],
) -> TodoService<&'a RecordingRepo> {
    let mut service = TodoService::empty(repo);
    for (index, (text, done)) in entries.iter().enumerate() {
        assert!(service.add(*text));
        if *done {
            assert!(service.toggle(index));
        }
    }
    service
}

#[test]
fn startup_without_stored_payload_yields_empty_list() {
    let repo = RecordingRepo::default();
    let service = TodoService::load(&repo);

    assert!(service.list().is_empty());
    assert_eq!(repo.write_count(), 0);
}

#[test]
fn add_persists_full_text_list() {
    let repo = RecordingRepo::default();
    let mut service = TodoService::load(&repo);

    assert!(service.add("Buy milk"));
    assert!(service.add("Walk dog"));

    assert_eq!(repo.write_count(), 2);
    assert_eq!(repo.last_write().as_deref(), Some(r#"["Buy milk","Walk dog"]"#));
}

#[test]
fn blank_add_and_stale_indices_do_not_write() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("only", false)]);
    let writes = repo.write_count();

    assert!(!service.add(""));
    assert!(!service.add("   "));
    assert!(!service.toggle(3));
    assert!(!service.delete_one(3));
    assert_eq!(service.delete_checked(), 0);
    assert_eq!(service.delete_from_row(3), RowDeleteOutcome::Ignored);

    assert_eq!(repo.write_count(), writes);
    assert_eq!(service.list().items(), &[item("only", false)]);
}

#[test]
fn scenario_single_checked_item_is_deleted() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("Buy milk", false)]);

    assert!(service.toggle(0));
    assert_eq!(service.delete_from_row(0), RowDeleteOutcome::Single);

    assert!(service.list().is_empty());
    assert_eq!(repo.last_write().as_deref(), Some("[]"));
}

#[test]
fn scenario_checked_row_with_several_checked_bulk_deletes() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("A", true), ("B", true), ("C", false)]);

    assert_eq!(service.delete_from_row(0), RowDeleteOutcome::Bulk(2));

    assert_eq!(service.list().items(), &[item("C", false)]);
    assert_eq!(repo.last_write().as_deref(), Some(r#"["C"]"#));
}

#[test]
fn scenario_unchecked_row_deletes_only_itself() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("A", true), ("B", false)]);

    assert_eq!(service.delete_from_row(1), RowDeleteOutcome::Single);

    assert_eq!(service.list().items(), &[item("A", true)]);
    assert_eq!(repo.last_write().as_deref(), Some(r#"["A"]"#));
}

#[test]
fn scenario_reload_resets_checked_state() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("X", true)]);
    assert_eq!(service.list().items(), &[item("X", true)]);

    service.reload();
    assert_eq!(service.list().items(), &[item("X", false)]);

    let fresh = TodoService::load(&repo);
    assert_eq!(fresh.list().items(), &[item("X", false)]);
}

#[test]
fn delete_checked_removes_all_checked_and_persists() {
    let repo = RecordingRepo::default();
    let mut service = seeded_service(&repo, &[("a", true), ("b", false), ("c", true)]);

    assert_eq!(service.delete_checked(), 2);
    assert_eq!(service.snapshot().texts(), vec!["b"]);
    assert_eq!(repo.last_write().as_deref(), Some(r#"["b"]"#));
}

#[test]
fn malformed_payload_is_treated_as_absent() {
    for payload in ["not json", r#"{"a":1}"#, r#"["a", 2]"#, "null"] {
        let repo = RecordingRepo::with_payload(payload);
        let service = TodoService::load(&repo);
        assert!(service.list().is_empty(), "payload {payload:?} should load empty");
    }
}

#[test]
fn storage_failures_are_swallowed() {
    let mut service = TodoService::load(DetachedKvRepository);
    assert!(service.list().is_empty());

    assert!(service.add("still works"));
    assert!(service.toggle(0));
    assert_eq!(service.delete_from_row(0), RowDeleteOutcome::Single);
    assert!(service.list().is_empty());

    assert!(!save_items(&DetachedKvRepository, &TodoList::from_texts(["x"])));
    assert!(load_items(&DetachedKvRepository).is_empty());
}

#[test]
fn round_trip_through_sqlite_keeps_order_and_clears_flags() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();

    let mut list = TodoList::new();
    for text in ["one", "two", "two", "  three  "] {
        assert!(list.add(text));
    }
    list.toggle(1);
    list.toggle(3);

    assert!(save_items(&repo, &list));
    let loaded = load_items(&repo);

    assert_eq!(loaded.texts(), list.texts());
    assert_eq!(loaded.checked_count(), 0);
}

#[test]
fn session_survives_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasklist.db");

    {
        let conn = open_db(&path).unwrap();
        let repo = SqliteKvRepository::try_new(&conn).unwrap();
        let mut service = TodoService::load(repo);
        assert!(service.add("persisted"));
        assert!(service.add("done soon"));
        assert!(service.toggle(1));
    }

    let conn = open_db(&path).unwrap();
    let repo = SqliteKvRepository::try_new(&conn).unwrap();
    let service = TodoService::load(repo);

    assert_eq!(
        service.list().items(),
        &[item("persisted", false), item("done soon", false)]
    );
}

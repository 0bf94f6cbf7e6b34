//! To-do session service.
//!
//! # Responsibility
//! - Own the in-memory list for one screen session.
//! - Persist the full list after every effective mutation.
//!
//! # Invariants
//! - Saves run inline and in order, so the last completed save always
//!   matches the last mutation.
//! - No-op mutations (blank add, stale index) do not touch storage.
//! - Storage failures never surface to callers.

use crate::model::todo::{RowDeleteOutcome, TodoList};
use crate::repo::kv_repo::KvRepository;
use crate::service::item_persistence::{load_items, save_items};
use log::{debug, info};

/// Session facade combining the list store with its persistence adapter.
pub struct TodoService<R: KvRepository> {
    repo: R,
    list: TodoList,
}

impl<R: KvRepository> TodoService<R> {
    /// Starts a session hydrated from storage.
    pub fn load(repo: R) -> Self {
        let list = load_items(&repo);
        Self { repo, list }
    }

    /// Starts a session with an empty list without reading storage.
    pub fn empty(repo: R) -> Self {
        Self::with_list(repo, TodoList::new())
    }

    /// Resumes a session whose list is already in memory.
    pub fn with_list(repo: R, list: TodoList) -> Self {
        Self { repo, list }
    }

    /// Current list, in display order.
    pub fn list(&self) -> &TodoList {
        &self.list
    }

    /// Cloned list for callers that outlive the borrow (UI snapshots).
    pub fn snapshot(&self) -> TodoList {
        self.list.clone()
    }

    /// Re-reads storage, discarding in-memory checked state.
    pub fn reload(&mut self) {
        self.list = load_items(&self.repo);
    }

    /// Appends a new item; blank text is ignored.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let added = self.list.add(text);
        if added {
            debug!(
                "event=item_add module=service status=ok count={}",
                self.list.len()
            );
            self.persist();
        }
        added
    }

    /// Flips the checked flag of one row; stale indices are ignored.
    pub fn toggle(&mut self, index: usize) -> bool {
        let toggled = self.list.toggle(index);
        if toggled {
            debug!("event=item_toggle module=service status=ok index={index}");
            self.persist();
        }
        toggled
    }

    /// Removes exactly one row.
    pub fn delete_one(&mut self, index: usize) -> bool {
        let removed = self.list.delete_one(index);
        if removed {
            debug!("event=item_delete module=service status=ok index={index}");
            self.persist();
        }
        removed
    }

    /// Removes every checked row.
    pub fn delete_checked(&mut self) -> usize {
        let removed = self.list.delete_checked();
        if removed > 0 {
            info!("event=items_delete_checked module=service status=ok removed={removed}");
            self.persist();
        }
        removed
    }

    /// Handles the delete icon of one row (may bulk delete checked rows).
    pub fn delete_from_row(&mut self, index: usize) -> RowDeleteOutcome {
        let outcome = self.list.delete_from_row(index);
        match outcome {
            RowDeleteOutcome::Bulk(removed) => {
                info!(
                    "event=row_delete module=service status=ok mode=bulk index={index} removed={removed}"
                );
                self.persist();
            }
            RowDeleteOutcome::Single => {
                debug!("event=row_delete module=service status=ok mode=single index={index}");
                self.persist();
            }
            RowDeleteOutcome::Ignored => {
                debug!("event=row_delete module=service status=ignored index={index}");
            }
        }
        outcome
    }

    fn persist(&self) {
        save_items(&self.repo, &self.list);
    }
}

//! To-do list domain model.
//!
//! # Responsibility
//! - Define the item record rendered as one row of the list screen.
//! - Own every list mutation (add/toggle/delete) and the row delete policy.
//!
//! # Invariants
//! - Item identity is positional: the index in `TodoList::items`.
//! - Every stored item has non-blank text (`text.trim()` is non-empty).
//! - Insertion order is display order.
//! - Out-of-range indices and blank text are ignored, never reported.

use serde::{Deserialize, Serialize};

/// One to-do entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Text as typed by the user (not trimmed).
    pub text: String,
    /// Checked/completed flag. Never persisted.
    pub done: bool,
}

impl TodoItem {
    /// Creates an unchecked item.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            done: false,
        }
    }
}

/// Which branch of the row delete policy fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowDeleteOutcome {
    /// All checked items were removed; carries the removed count.
    Bulk(usize),
    /// Only the targeted row was removed.
    Single,
    /// Index was out of range; list untouched.
    Ignored,
}

impl RowDeleteOutcome {
    /// Number of items removed by this outcome.
    pub fn removed(self) -> usize {
        match self {
            Self::Bulk(count) => count,
            Self::Single => 1,
            Self::Ignored => 0,
        }
    }
}

/// Ordered in-memory list of to-do items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an unchecked list from persisted texts.
    ///
    /// Blank texts are skipped so loaded items keep the non-blank invariant.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = texts
            .into_iter()
            .map(Into::into)
            .filter(|text: &String| !text.trim().is_empty())
            .map(TodoItem::new)
            .collect();
        Self { items }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, index: usize) -> Option<&TodoItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items currently checked.
    pub fn checked_count(&self) -> usize {
        self.items.iter().filter(|item| item.done).count()
    }

    /// Item texts in display order; this is the persisted projection.
    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Appends an unchecked item.
    ///
    /// Returns `false` (and leaves the list untouched) when `text` is blank.
    /// Accepted text is stored exactly as given.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.items.push(TodoItem::new(text));
        true
    }

    /// Flips the checked flag at `index`. Returns `false` when out of range.
    pub fn toggle(&mut self, index: usize) -> bool {
        match self.items.get_mut(index) {
            Some(item) => {
                item.done = !item.done;
                true
            }
            None => false,
        }
    }

    /// Removes the item at `index`. Returns `false` when out of range.
    pub fn delete_one(&mut self, index: usize) -> bool {
        if index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Removes every checked item, keeping the relative order of the rest.
    ///
    /// Returns the number of removed items.
    pub fn delete_checked(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|item| !item.done);
        before - self.items.len()
    }

    /// Applies the delete action of one row.
    ///
    /// # Contract
    /// - Target checked and more than one item checked: removes all checked
    ///   items (`Bulk`).
    /// - Otherwise: removes only the target, checked or not (`Single`).
    /// - Out-of-range index: no-op (`Ignored`).
    pub fn delete_from_row(&mut self, index: usize) -> RowDeleteOutcome {
        let Some(target) = self.items.get(index) else {
            return RowDeleteOutcome::Ignored;
        };

        if target.done && self.checked_count() > 1 {
            return RowDeleteOutcome::Bulk(self.delete_checked());
        }

        self.items.remove(index);
        RowDeleteOutcome::Single
    }
}

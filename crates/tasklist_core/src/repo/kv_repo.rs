//! Key-value repository contracts and implementations.
//!
//! # Responsibility
//! - Provide get/set over single string slots.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `set` fully overwrites the previous value for a key.
//! - SQLite repositories only accept connections with migrations applied.
//! - `DetachedKvRepository` fails every call, so callers fall through their
//!   log-and-continue paths and keep working in memory.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";
const KV_REQUIRED_COLUMNS: &[&str] = &["key", "value", "updated_at"];

/// Durable string slots addressed by a fixed key.
pub trait KvRepository {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<R: KvRepository + ?Sized> KvRepository for &R {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

/// SQLite-backed key-value repository.
pub struct SqliteKvRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvRepository<'conn> {
    /// Wraps a connection after checking it went through migrations.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` is behind.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the schema
    ///   was tampered with.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_user_version(conn)?;
        if actual_version < expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        ensure_kv_schema(conn)?;
        Ok(Self { conn })
    }
}

impl KvRepository for SqliteKvRepository<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Stand-in used when no database could be opened.
///
/// Reads and writes fail with `StorageError::Unavailable`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedKvRepository;

impl KvRepository for DetachedKvRepository {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Err(StorageError::Unavailable)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Err(StorageError::Unavailable)
    }
}

fn ensure_kv_schema(conn: &Connection) -> StorageResult<()> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let columns = stmt
        .query_map([KV_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    if columns.is_empty() {
        return Err(StorageError::MissingRequiredTable(KV_TABLE));
    }

    for column in KV_REQUIRED_COLUMNS {
        if !columns.iter().any(|name| name == column) {
            return Err(StorageError::MissingRequiredColumn {
                table: KV_TABLE,
                column: *column,
            });
        }
    }

    Ok(())
}

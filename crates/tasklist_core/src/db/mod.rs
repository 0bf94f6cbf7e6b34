//! SQLite storage bootstrap for the to-do key-value slot.
//!
//! # Responsibility
//! - Open and configure SQLite connections for tasklist core.
//! - Apply schema migrations before any key-value access.
//! - Own the one error type every storage layer reports.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - A database written by a newer binary is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure anywhere between the SQLite file and the key-value slot.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    /// File was migrated by a newer binary.
    UnsupportedSchemaVersion { db_version: u32, latest_supported: u32 },
    /// Connection was opened without `open_db`, so migrations are pending.
    UninitializedConnection { expected_version: u32, actual_version: u32 },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
    /// No durable storage backs this session.
    Unavailable,
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "schema version {db_version} was written by a newer build (this build knows up to {latest_supported})"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "schema version {actual_version} is behind required {expected_version}; open the file with db::open_db"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
            Self::Unavailable => f.write_str("durable storage is unavailable"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

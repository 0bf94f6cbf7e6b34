//! Schema steps for the key-value store.
//!
//! Each step runs inside one transaction together with every other pending
//! step, and bumps `PRAGMA user_version` right after its SQL succeeds.

use crate::db::{StorageError, StorageResult};
use log::{debug, info};
use rusqlite::Connection;

struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    name: "kv_entries",
    sql: include_str!("0001_kv_entries.sql"),
}];

/// Highest schema version this build can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Schema version recorded in the database header.
pub fn current_user_version(conn: &Connection) -> StorageResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?)
}

/// Brings the schema up to `latest_version()`.
///
/// Returns the version the database ends at.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file is ahead of this build.
/// - `Sqlite` when a step fails; nothing from the batch is kept.
pub fn apply_migrations(conn: &mut Connection) -> StorageResult<u32> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(StorageError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect::<Vec<_>>();
    if pending.is_empty() {
        return Ok(from_version);
    }

    let tx = conn.transaction()?;
    for step in &pending {
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
        debug!(
            "event=db_migrate module=db status=step version={} name={}",
            step.version, step.name
        );
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={}",
        from_version,
        latest,
        pending.len()
    );
    Ok(latest)
}

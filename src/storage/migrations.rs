//! Database migrations for breathe.
//!
//! Each migration is a function that upgrades the schema by one version.
//! Migrations are run automatically when the database is opened.

use rusqlite::Connection;

use crate::error::BreatheError;

/// Current schema version.
const CURRENT_VERSION: i32 = 1;

/// Get the current schema version from the database.
///
/// Returns 0 if no version has been set (new database).
pub fn get_version(conn: &Connection) -> Result<i32, BreatheError> {
    let version: i32 = conn
        .query_row("PRAGMA user_version", [], |row| row.get(0))
        .map_err(|e| BreatheError::Database(format!("Failed to get schema version: {e}")))?;

    Ok(version)
}

/// Set the schema version in the database.
fn set_version(conn: &Connection, version: i32) -> Result<(), BreatheError> {
    conn.execute_batch(&format!("PRAGMA user_version = {version};"))
        .map_err(|e| BreatheError::Database(format!("Failed to set schema version: {e}")))
}

/// Run all pending migrations.
pub fn run(conn: &Connection) -> Result<(), BreatheError> {
    let current = get_version(conn)?;

    if current >= CURRENT_VERSION {
        return Ok(());
    }

    for version in (current + 1)..=CURRENT_VERSION {
        tracing::debug!(version, "running migration");
        run_migration(conn, version)?;
        set_version(conn, version)?;
    }

    Ok(())
}

/// Run a specific migration.
fn run_migration(conn: &Connection, version: i32) -> Result<(), BreatheError> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(BreatheError::Database(format!(
            "Unknown migration version: {version}"
        ))),
    }
}

/// Migration v1: practice log.
///
/// One row per finished session, keyed by the local calendar day it was
/// recorded on.
fn migrate_v1(conn: &Connection) -> Result<(), BreatheError> {
    conn.execute_batch(
        r"
        CREATE TABLE IF NOT EXISTS practice_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            day TEXT NOT NULL,
            technique TEXT NOT NULL,
            cycles INTEGER NOT NULL,
            seconds INTEGER NOT NULL,
            recorded_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_practice_log_day
        ON practice_log(day);
        ",
    )
    .map_err(|e| BreatheError::Database(format!("Migration v1 failed: {e}")))
}

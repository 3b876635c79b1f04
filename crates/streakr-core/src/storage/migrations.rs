//! Database schema migrations for streakr.
//!
//! Migrations are versioned and applied automatically when opening the database.
//! The `schema_version` table tracks the current migration version.

use rusqlite::{Connection, Result as SqliteResult};

/// Current schema version.
///
/// Increment this when adding new migrations.
pub const SCHEMA_VERSION: i32 = 2;

/// Apply all pending migrations to bring the database to the current schema version.
///
/// # Errors
/// Returns an error if migration fails.
pub fn migrate(conn: &Connection) -> SqliteResult<()> {
    create_schema_version_table(conn)?;

    let current_version = get_schema_version(conn);
    tracing::debug!(current_version, target_version = SCHEMA_VERSION, "checking schema");

    if current_version < 1 {
        migrate_v1(conn)?;
    }
    if current_version < 2 {
        migrate_v2(conn)?;
    }

    Ok(())
}

fn create_schema_version_table(conn: &Connection) -> SqliteResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );",
    )
}

/// Get the current schema version from the database.
///
/// Returns 0 if no version is set (initial database).
pub(crate) fn get_schema_version(conn: &Connection) -> i32 {
    conn.query_row("SELECT version FROM schema_version", [], |row| {
        row.get::<_, i32>(0)
    })
    .unwrap_or_else(|e| {
        if !matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            tracing::warn!(error = %e, "failed to read schema_version");
        }
        0
    })
}

fn set_schema_version(conn: &Connection, version: i32) -> SqliteResult<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute("INSERT INTO schema_version (version) VALUES (?1)", [version])?;
    Ok(())
}

/// Migration v1: habits and their streak intervals.
fn migrate_v1(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS habits (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (length(name) <= 50),
            description TEXT CHECK (description IS NULL OR length(description) <= 200),
            habit_type  TEXT NOT NULL DEFAULT 'improve' CHECK (habit_type IN ('improve', 'quit')),
            created_at  TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS streaks (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            habit_id     INTEGER NOT NULL,
            streak_start TEXT NOT NULL,
            streak_end   TEXT NOT NULL,
            CHECK (streak_start <= streak_end),
            FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_streaks_habit_id ON streaks(habit_id);
        CREATE INDEX IF NOT EXISTS idx_streaks_habit_end ON streaks(habit_id, streak_end);",
    )?;

    set_schema_version(&tx, 1)?;
    tx.commit()
}

/// Migration v2: aliases.
///
/// Each habit may carry up to five short aliases usable anywhere a name is.
fn migrate_v2(conn: &Connection) -> SqliteResult<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS habit_aliases (
            habit_id INTEGER NOT NULL,
            alias    TEXT NOT NULL UNIQUE COLLATE NOCASE CHECK (length(alias) <= 15),
            FOREIGN KEY (habit_id) REFERENCES habits(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_habit_aliases_habit_id ON habit_aliases(habit_id);",
    )?;

    set_schema_version(&tx, 2)?;
    tx.commit()
}

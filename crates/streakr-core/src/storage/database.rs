//! SQLite-backed habit registry.
//!
//! Provides persistent storage for:
//! - Habit records and their aliases
//! - Streak intervals (see `intervals.rs`)

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::data_dir;
use super::migrations;
use super::traits::HabitRegistry;
use crate::date::{format_date, parse_date};
use crate::error::{CoreError, DatabaseError};
use crate::habit::{Habit, HabitType, NewHabit};

pub const DB_FILE_NAME: &str = "streakr.db";

const HABIT_COLUMNS: &str = "h.id, h.name, h.description, h.habit_type, h.created_at";

/// Read a `YYYY-MM-DD` column.
pub(crate) fn date_column(row: &Row, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    parse_date(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Text,
            format!("invalid date '{raw}'").into(),
        )
    })
}

/// Parse habit type from database string
fn parse_habit_type(type_str: &str) -> HabitType {
    match type_str {
        "quit" => HabitType::Quit,
        _ => HabitType::Improve,
    }
}

/// Build a Habit (without aliases) from a database row
fn row_to_habit(row: &Row) -> rusqlite::Result<Habit> {
    let type_str: String = row.get(3)?;
    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        aliases: Vec::new(),
        description: row.get(2)?,
        habit_type: parse_habit_type(&type_str),
        created_date: date_column(row, 4)?,
    })
}

/// SQLite database holding habits and streak intervals.
pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// File backing this database; `None` for in-memory databases.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Open the database at `<data dir>/streakr.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join(DB_FILE_NAME);
        Self::open_at(&path)
    }

    /// Open (or create) a database file at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, CoreError> {
        let conn = Connection::open(path).map_err(|source| DatabaseError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.init()?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(|source| DatabaseError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let db = Self { conn, path: None };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<(), DatabaseError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))
    }

    /// Close the connection, reporting any error SQLite raises while doing so.
    pub fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().map_err(|(_, err)| err.into())
    }

    fn load_aliases(&self, habit_id: i64) -> Result<Vec<String>, rusqlite::Error> {
        let mut stmt = self
            .conn
            .prepare("SELECT alias FROM habit_aliases WHERE habit_id = ?1 ORDER BY rowid")?;
        let rows = stmt.query_map(params![habit_id], |row| row.get::<_, String>(0))?;
        rows.collect()
    }

    fn with_aliases(&self, mut habit: Habit) -> Result<Habit, rusqlite::Error> {
        habit.aliases = self.load_aliases(habit.id)?;
        Ok(habit)
    }
}

impl HabitRegistry for Database {
    fn insert_habit(&self, habit: &NewHabit, created: NaiveDate) -> Result<Habit, DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO habits (name, description, habit_type, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                habit.name,
                habit.description,
                habit.habit_type.as_str(),
                format_date(created),
            ],
        )?;
        let id = tx.last_insert_rowid();
        for alias in &habit.aliases {
            tx.execute(
                "INSERT INTO habit_aliases (habit_id, alias) VALUES (?1, ?2)",
                params![id, alias],
            )?;
        }
        tx.commit()?;

        Ok(Habit {
            id,
            name: habit.name.clone(),
            aliases: habit.aliases.clone(),
            description: habit.description.clone(),
            habit_type: habit.habit_type,
            created_date: created,
        })
    }

    fn find_habit(&self, query: &str) -> Result<Option<Habit>, DatabaseError> {
        let by_name = self
            .conn
            .query_row(
                &format!("SELECT {HABIT_COLUMNS} FROM habits h WHERE h.name = ?1"),
                params![query],
                row_to_habit,
            )
            .optional()?;
        let found = match by_name {
            Some(habit) => Some(habit),
            None => self
                .conn
                .query_row(
                    &format!(
                        "SELECT {HABIT_COLUMNS} FROM habits h
                         JOIN habit_aliases a ON a.habit_id = h.id
                         WHERE a.alias = ?1"
                    ),
                    params![query],
                    row_to_habit,
                )
                .optional()?,
        };
        Ok(found.map(|h| self.with_aliases(h)).transpose()?)
    }

    fn list_habits(&self) -> Result<Vec<Habit>, DatabaseError> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {HABIT_COLUMNS} FROM habits h ORDER BY h.name"))?;
        let habits = stmt
            .query_map([], row_to_habit)?
            .collect::<Result<Vec<_>, _>>()?;
        let habits = habits
            .into_iter()
            .map(|h| self.with_aliases(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(habits)
    }

    fn rename_habit(&self, habit_id: i64, new_name: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "UPDATE habits SET name = ?1 WHERE id = ?2",
            params![new_name, habit_id],
        )?;
        Ok(())
    }

    fn add_alias(&self, habit_id: i64, alias: &str) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO habit_aliases (habit_id, alias) VALUES (?1, ?2)",
            params![habit_id, alias],
        )?;
        Ok(())
    }

    fn remove_alias(&self, habit_id: i64, alias: &str) -> Result<bool, DatabaseError> {
        let removed = self.conn.execute(
            "DELETE FROM habit_aliases WHERE habit_id = ?1 AND alias = ?2",
            params![habit_id, alias],
        )?;
        Ok(removed > 0)
    }

    fn delete_habit(&self, habit_id: i64) -> Result<(), DatabaseError> {
        self.conn
            .execute("DELETE FROM habits WHERE id = ?1", params![habit_id])?;
        Ok(())
    }
}

//! Core error types for streakr-core.
//!
//! Errors are grouped by where they originate: habit resolution, input
//! validation, storage, and configuration. Everything funnels into
//! [`CoreError`] so callers can propagate with `?`.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for streakr-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A habit name or alias did not resolve to a habit.
    #[error("No habit with name {name}")]
    NotFound { name: String },

    /// Validation errors
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data broke an invariant the engine relies on.
    #[error("internal error: {0}")]
    Invariant(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// A UNIQUE / CHECK / FOREIGN KEY constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("{field} {message}")]
    InvalidValue { field: String, message: String },

    /// Value exceeds its length limit
    #[error("{field} cannot exceed {max} characters")]
    TooLong { field: String, max: usize },

    /// Collection exceeds its size limit
    #[error("a habit cannot have more than {max} {field}")]
    TooMany { field: String, max: usize },

    /// Name or alias already taken
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Range end precedes range start
    #[error("Invalid date range: end ({end}) is before start ({start})")]
    InvalidDateRange {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

impl ValidationError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, msg) => match failure.code {
                rusqlite::ErrorCode::DatabaseLocked | rusqlite::ErrorCode::DatabaseBusy => {
                    DatabaseError::Locked
                }
                rusqlite::ErrorCode::ConstraintViolation => DatabaseError::ConstraintViolation(
                    msg.clone().unwrap_or_else(|| failure.to_string()),
                ),
                _ => DatabaseError::QueryFailed(err.to_string()),
            },
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

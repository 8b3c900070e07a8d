//! Shared error types for the SurfsUp service.
//!
//! Every enum carries the full detail in its `Display` output (for logs).
//! Storage errors also give a short client-safe string from `user_message()`
//! (for HTTP responses).

use thiserror::Error;

/// Top-level application error type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Database/storage errors (SQLite).
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Data corruption detected: {0}")]
    Corruption(String),

    #[error("Table not found: {0}")]
    MissingTable(String),

    #[error("Schema mismatch in table {table}: missing column {column}")]
    SchemaMismatch { table: String, column: String },
}

impl DatabaseError {
    pub fn user_message(&self) -> &'static str {
        match self {
            DatabaseError::ConnectionFailed(_) => "The climate dataset is not reachable.",
            DatabaseError::QueryFailed(_) => "A data query failed.",
            DatabaseError::Corruption(_) => "The climate dataset contains invalid data.",
            DatabaseError::MissingTable(_) | DatabaseError::SchemaMismatch { .. } => {
                "The climate dataset has an unexpected layout."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

/// Extension trait for converting rusqlite errors to our error types.
pub trait RusqliteErrorExt {
    fn into_database_error(self) -> DatabaseError;
}

impl RusqliteErrorExt for rusqlite::Error {
    fn into_database_error(self) -> DatabaseError {
        match &self {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("corrupt") => {
                DatabaseError::Corruption(self.to_string())
            }
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                DatabaseError::ConnectionFailed(self.to_string())
            }
            rusqlite::Error::FromSqlConversionFailure(..)
            | rusqlite::Error::InvalidColumnType(..) => DatabaseError::Corruption(self.to_string()),
            _ => DatabaseError::QueryFailed(self.to_string()),
        }
    }
}

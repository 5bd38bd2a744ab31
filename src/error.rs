//! Error types for Daynotes.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for Daynotes operations
pub type NotesResult<T> = Result<T, NotesError>;

/// Main error type for Daynotes operations
#[derive(Error, Debug)]
pub enum NotesError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Schema migration failed: {0}")]
    Migration(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Note store is not ready")]
    NotReady,

    #[error("{0}")]
    Other(String),
}

impl NotesError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        NotesError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new migration error
    pub fn migration(message: impl Into<String>) -> Self {
        NotesError::Migration(message.into())
    }

    /// Whether this error was raised before anything reached storage
    pub fn is_validation(&self) -> bool {
        matches!(self, NotesError::Validation { .. })
    }

    /// Message suitable for showing to the user.
    ///
    /// Validation failures carry a message written for the user already;
    /// everything else is reported as is.
    pub fn user_message(&self) -> String {
        match self {
            NotesError::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Validation error with field and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for NotesError {
    fn from(err: ValidationError) -> Self {
        NotesError::Validation {
            field: err.field,
            message: err.message,
        }
    }
}

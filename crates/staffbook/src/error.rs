//! Error types for staffbook.
//!
//! This module defines all error types used throughout the staffbook crate.
//! Missing rows on update/delete and unparseable salaries are not errors; see
//! [`crate::records`] for how those are absorbed.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for staffbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A required form field was blank. Nothing was written.
    #[error("required field '{field}' is blank")]
    Validation {
        /// Name of the blank field.
        field: &'static str,
    },

    /// An activity referenced an employee that does not exist.
    #[error("no employee with id {id}")]
    UnknownEmployee {
        /// The employee id that was referenced.
        id: i64,
    },

    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    // === Report Errors ===
    /// The PDF backend failed to produce the document.
    #[error("failed to render report: {0}")]
    ReportRender(String),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// A specialized Result type for staffbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for a blank field.
    #[must_use]
    pub fn blank(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Create a report rendering error.
    #[must_use]
    pub fn report_render(message: impl Into<String>) -> Self {
        Self::ReportRender(message.into())
    }

    /// Check if this error was caused by incomplete input rather than a failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. } | Self::UnknownEmployee { .. })
    }
}

//! Error types for walkaround.
//!
//! This module defines all error types used throughout the walkaround crate,
//! separating user-correctable checklist validation failures from storage,
//! configuration and export failures.

use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Reasons a checklist cannot be submitted.
///
/// These are surfaced directly to the person filling in the checklist; all of
/// them are recoverable by correcting the input and submitting again.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The driver name is empty.
    #[error("missing driver name: please enter the driver's name")]
    MissingDriverName,

    /// The truck number is empty.
    #[error("missing truck number: please enter the truck number")]
    MissingTruckNumber,

    /// One or more catalog items are not checked.
    #[error(
        "incomplete checklist: please complete all checklist items before submitting ({} remaining)",
        missing.len()
    )]
    IncompleteChecklist {
        /// Labels of the unchecked items, in catalog order.
        missing: Vec<String>,
    },
}

/// The main error type for walkaround operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Validation Errors ===
    /// The checklist failed validation and was not submitted.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A category name does not exist in the catalog.
    #[error("unknown checklist category '{name}'")]
    UnknownCategory {
        /// The name that was looked up.
        name: String,
    },

    // === Record Errors ===
    /// No record matches the given identifier.
    #[error("no record found for '{reference}'")]
    RecordNotFound {
        /// The identifier or prefix that was looked up.
        reference: String,
    },

    /// An id prefix matches more than one record.
    #[error("'{reference}' matches {count} records, use a longer id")]
    AmbiguousRecord {
        /// The prefix that was looked up.
        reference: String,
        /// How many records matched.
        count: usize,
    },

    // === Persistence Errors ===
    /// The persisted collection could not be decoded.
    #[error("failed to decode saved records under key '{key}': {source}")]
    PersistenceDecode {
        /// The store key holding the collection.
        key: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The collection could not be encoded for saving.
    #[error("failed to encode records for key '{key}': {source}")]
    PersistenceEncode {
        /// The store key that would have been written.
        key: String,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
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

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

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

    // === Export Errors ===
    /// The export artifact could not be delivered.
    #[error("failed to export {file_name}: {message}")]
    Export {
        /// Suggested file name of the artifact.
        file_name: String,
        /// Description of what went wrong.
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

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for walkaround operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an unknown category error.
    #[must_use]
    pub fn unknown_category(name: impl Into<String>) -> Self {
        Self::UnknownCategory { name: name.into() }
    }

    /// Create a record-not-found error for an id.
    #[must_use]
    pub fn record_not_found(id: Uuid) -> Self {
        Self::RecordNotFound {
            reference: id.to_string(),
        }
    }

    /// Create an export error.
    #[must_use]
    pub fn export(file_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Export {
            file_name: file_name.into(),
            message: message.into(),
        }
    }

    /// Check if this error is a checklist validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error means the requested record does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecordNotFound { .. })
    }
}

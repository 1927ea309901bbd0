//! Error types for the training library.

use std::path::PathBuf;

use thiserror::Error;

/// Every failure a training operation can surface.
///
/// Validation-flavoured variants (`IndexIntegrity`, `Validation`, `Reference`)
/// abort the enclosing transaction. Import-flavoured variants
/// (`Classification`, `Format`) abort the Plan or Session element being
/// imported and carry the offending raw value for manual inspection.
#[derive(Error, Debug)]
pub enum TrainingError {
    /// Ordinal positions of Loops or Goals are not `0..n` without gaps or
    /// duplicates
    #[error("Index integrity error: {message}")]
    IndexIntegrity { message: String },
    /// Field-level constraint violation
    #[error("Invalid value for field '{field}': {reason}")]
    Validation { field: String, reason: String },
    /// A referenced Exercise does not exist
    #[error("Reference error: {message}")]
    Reference { message: String },
    /// Exercise attributes in an import file match no known pattern
    #[error("Cannot classify exercise {element}: {reason}")]
    Classification { element: String, reason: String },
    /// Unparseable XML, date or numeric attribute
    #[error("Format error in '{value}': {reason}")]
    Format { value: String, reason: String },
    /// Entity lookup by id found nothing
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u64 },
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TrainingError {
        TrainingError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for field validation errors.
pub struct ValidationErrorBuilder {
    field: String,
}

impl ValidationErrorBuilder {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TrainingError {
        TrainingError::Validation {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TrainingError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for field validation errors.
    pub fn validation(field: impl Into<String>) -> ValidationErrorBuilder {
        ValidationErrorBuilder::new(field)
    }

    pub fn index_integrity(message: impl Into<String>) -> Self {
        Self::IndexIntegrity {
            message: message.into(),
        }
    }

    pub fn reference(message: impl Into<String>) -> Self {
        Self::Reference {
            message: message.into(),
        }
    }

    pub fn format(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TrainingError::database(message).with_source(e))
    }
}

/// Result type alias for training operations
pub type Result<T> = std::result::Result<T, TrainingError>;

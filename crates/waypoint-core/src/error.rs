//! Error types for itinerary operations.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for every trip, day and activity operation.
#[derive(Error, Debug)]
pub enum ItineraryError {
    /// The backing store failed
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Trip not found for the given ID
    #[error("Trip with ID {id} not found")]
    TripNotFound { id: u64 },
    /// Itinerary day not found for the given ID
    #[error("Itinerary day with ID {id} not found")]
    DayNotFound { id: u64 },
    /// Activity not found for the given ID
    #[error("Activity with ID {id} not found")]
    ActivityNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Input violates a field constraint or an itinerary invariant
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Coarse classification of an [`ItineraryError`].
///
/// Callers use this to tell "bad input" apart from "stale reference" and from
/// storage failures without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// User-correctable input problem
    Validation,
    /// Referenced trip, day or activity does not exist
    NotFound,
    /// Storage or environment failure; not recoverable at this layer
    Persistence,
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> ItineraryError {
        ItineraryError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> ItineraryError {
        ItineraryError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl ItineraryError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Shorthand for a database error with context.
    pub fn database_error(message: &str, source: rusqlite::Error) -> Self {
        Self::database(message).with_source(source)
    }

    /// Classifies this error into one of the three error kinds.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::Validation,
            Self::TripNotFound { .. } | Self::DayNotFound { .. } | Self::ActivityNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Database { .. }
            | Self::FileSystem { .. }
            | Self::XdgDirectory(_)
            | Self::Serialization { .. }
            | Self::Configuration { .. } => ErrorKind::Persistence,
        }
    }

    /// Returns true for any of the not-found variants.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true for validation failures.
    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not found",
            ErrorKind::Persistence => "persistence",
        };
        f.write_str(label)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| ItineraryError::database(message).with_source(e))
    }
}

/// Maps a `QueryReturnedNoRows` to the given not-found error and anything
/// else to a database error.
pub(crate) trait NotFoundExt<T> {
    fn or_not_found(self, not_found: ItineraryError, message: &str) -> Result<T>;
}

impl<T> NotFoundExt<T> for std::result::Result<T, rusqlite::Error> {
    fn or_not_found(self, not_found: ItineraryError, message: &str) -> Result<T> {
        self.map_err(|e| {
            if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                not_found
            } else {
                ItineraryError::database_error(message, e)
            }
        })
    }
}

/// Result type alias for itinerary operations
pub type Result<T> = std::result::Result<T, ItineraryError>;

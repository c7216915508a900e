//! Error types for the eventdir ecosystem.

use thiserror::Error;

/// Errors that can occur in eventdir operations.
#[derive(Error, Debug)]
pub enum EventDirError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Event already exists with the same name, organization, and start date")]
    DuplicateEvent,

    #[error("Record parse error: {0}")]
    RecordParse(String),

    #[error("Record generation error: {0}")]
    RecordGenerate(String),

    #[error("Invalid submission: {0}")]
    Validation(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for eventdir operations.
pub type EventDirResult<T> = Result<T, EventDirError>;

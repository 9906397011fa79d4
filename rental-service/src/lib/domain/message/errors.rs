use thiserror::Error;

/// Error for MessageId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for MessageContent validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MessageContentError {
    #[error("Message content must not be empty")]
    Empty,

    #[error("Message content too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for message operations
#[derive(Debug, Clone, Error)]
pub enum MessageError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid message ID: {0}")]
    InvalidMessageId(#[from] MessageIdError),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] MessageContentError),

    // Domain-level errors
    #[error("Rental not found: {0}")]
    RentalNotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),
}

use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::message::errors::MessageContentError;
use crate::domain::message::errors::MessageIdError;
use crate::domain::rental::models::RentalId;
use crate::domain::user::models::UserId;

/// Message aggregate entity.
///
/// Connects a user interested in a rental to its owner. The recipient is
/// always the rental's owner at send time.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: MessageId,
    pub rental_id: RentalId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub content: MessageContent,
    pub sent_at: DateTime<Utc>,
}

/// Message unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageId(pub Uuid);

impl MessageId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a message ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, MessageIdError> {
        Uuid::parse_str(s)
            .map(MessageId)
            .map_err(|e| MessageIdError::InvalidFormat(e.to_string()))
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Message content value object with validation.
///
/// Ensures content is non-blank and within the 4000 character limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    const MAX_LENGTH: usize = 4000;

    /// Create a new validated message content.
    ///
    /// # Errors
    /// * `Empty` - Content is empty or whitespace only
    /// * `TooLong` - Content exceeds 4000 characters
    pub fn new(content: String) -> Result<Self, MessageContentError> {
        if content.trim().is_empty() {
            return Err(MessageContentError::Empty);
        }
        let length = content.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(MessageContentError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        Ok(Self(content))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

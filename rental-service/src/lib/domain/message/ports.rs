use async_trait::async_trait;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageContent;
use crate::domain::rental::models::RentalId;
use crate::domain::user::models::UserId;

/// Port for message domain service operations.
#[async_trait]
pub trait MessageServicePort: Send + Sync + 'static {
    /// Send a message about a rental to its owner.
    ///
    /// The recipient is resolved from the rental itself, never taken from
    /// the request body.
    ///
    /// # Errors
    /// * `RentalNotFound` - Rental does not exist
    /// * `DatabaseError` - Database operation failed
    async fn send_message(
        &self,
        sender_id: UserId,
        rental_id: RentalId,
        content: MessageContent,
    ) -> Result<Message, MessageError>;
}

/// Persistence operations for the message aggregate.
#[async_trait]
pub trait MessageRepository: Send + Sync + 'static {
    /// Persist a new message.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, message: Message) -> Result<Message, MessageError>;
}

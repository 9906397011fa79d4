use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::models::MessageContent;
use crate::domain::message::models::MessageId;
use crate::domain::message::ports::MessageRepository;
use crate::domain::message::ports::MessageServicePort;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::ports::RentalRepository;
use crate::domain::user::models::UserId;

/// Domain service for sending messages about rentals.
pub struct MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    message_repository: Arc<MR>,
    rental_repository: Arc<RR>,
}

impl<MR, RR> MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    pub fn new(message_repository: Arc<MR>, rental_repository: Arc<RR>) -> Self {
        Self {
            message_repository,
            rental_repository,
        }
    }
}

#[async_trait]
impl<MR, RR> MessageServicePort for MessageService<MR, RR>
where
    MR: MessageRepository,
    RR: RentalRepository,
{
    async fn send_message(
        &self,
        sender_id: UserId,
        rental_id: RentalId,
        content: MessageContent,
    ) -> Result<Message, MessageError> {
        let rental = self
            .rental_repository
            .find_by_id(&rental_id)
            .await
            .map_err(|e| MessageError::DatabaseError(e.to_string()))?
            .ok_or(MessageError::RentalNotFound(rental_id.to_string()))?;

        let message = Message {
            id: MessageId::new(),
            rental_id,
            sender_id,
            recipient_id: rental.owner_id,
            content,
            sent_at: Utc::now(),
        };

        let saved = self.message_repository.create(message).await?;

        tracing::debug!(
            message_id = %saved.id,
            rental_id = %saved.rental_id,
            "Message stored"
        );

        Ok(saved)
    }
}

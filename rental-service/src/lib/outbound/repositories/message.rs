use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::message::errors::MessageError;
use crate::domain::message::models::Message;
use crate::domain::message::ports::MessageRepository;

pub struct PostgresMessageRepository {
    pool: PgPool,
}

impl PostgresMessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PostgresMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, MessageError> {
        sqlx::query(
            r#"
            INSERT INTO messages (id, rental_id, sender_id, recipient_id, content, sent_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(message.id.0)
        .bind(message.rental_id.0)
        .bind(message.sender_id.0)
        .bind(message.recipient_id.0)
        .bind(message.content.as_str())
        .bind(message.sent_at)
        .execute(&self.pool)
        .await
        .map_err(|e| MessageError::DatabaseError(e.to_string()))?;

        Ok(message)
    }
}

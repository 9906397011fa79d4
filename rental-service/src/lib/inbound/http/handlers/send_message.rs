use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::StatusMessage;
use crate::domain::message::errors::MessageContentError;
use crate::domain::message::models::MessageContent;
use crate::domain::rental::errors::RentalIdError;
use crate::domain::rental::models::RentalId;
use crate::domain::user::errors::UserIdError;
use crate::domain::user::models::UserId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let (rental_id, content) = body.try_into_parts()?;

    state
        .message_service
        .send_message(user.user_id, rental_id, content)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(StatusMessage {
        message: "Message sent !".to_string(),
    }))
}

/// HTTP request body for sending a message (raw JSON).
///
/// `user_id` names the intended recipient but is only checked for shape:
/// the actual recipient is always the rental's current owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
    pub user_id: String,
    pub rental_id: String,
}

#[derive(Debug, Clone, Error)]
enum ParseSendMessageError {
    #[error("Invalid message: {0}")]
    Content(#[from] MessageContentError),

    #[error("Invalid user_id: {0}")]
    UserId(#[from] UserIdError),

    #[error("Invalid rental_id: {0}")]
    RentalId(#[from] RentalIdError),
}

impl SendMessageRequest {
    fn try_into_parts(self) -> Result<(RentalId, MessageContent), ParseSendMessageError> {
        let content = MessageContent::new(self.message)?;
        UserId::from_string(&self.user_id)?;
        let rental_id = RentalId::from_string(&self.rental_id)?;
        Ok((rental_id, content))
    }
}

impl From<ParseSendMessageError> for ApiError {
    fn from(err: ParseSendMessageError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

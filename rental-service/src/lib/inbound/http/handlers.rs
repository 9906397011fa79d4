use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::auth::errors::AuthError;
use crate::domain::message::errors::MessageError;
use crate::domain::rental::errors::RentalError;
use crate::domain::user::errors::UserError;

pub mod create_rental;
pub mod get_rental;
pub mod get_rental_picture;
pub mod get_user;
pub mod list_rentals;
pub mod login;
pub mod me;
pub mod register;
pub mod send_message;
pub mod update_rental;

/// Uniform error type for every handler and extractor.
///
/// All failures, authentication included, render as the same
/// `{"message": ...}` JSON body with the mapped status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Forbidden(String),
    Conflict(String),
    Unauthorized(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiErrorBody { message })).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorBody {
    pub message: String,
}

/// Plain confirmation body (`{"message": ...}`) used by write endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub message: String,
}

/// Rental dates are presented as `yyyy/MM/dd`.
pub(crate) fn format_date(date: chrono::DateTime<chrono::Utc>) -> String {
    date.format("%Y/%m/%d").to_string()
}

/// Delivery URL of a rental's stored picture, when it has one.
pub(crate) fn picture_url(rental: &crate::domain::rental::models::Rental) -> Option<String> {
    rental
        .has_picture
        .then(|| format!("/api/rentals/{}/picture", rental.id))
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) | UserError::NotFoundByEmail(_) => {
                ApiError::NotFound(err.to_string())
            }
            UserError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            UserError::InvalidDisplayName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_) => ApiError::UnprocessableEntity(err.to_string()),
            UserError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            // Collapsed on purpose: the response must not reveal whether the
            // identifier exists.
            AuthError::IdentifierNotFound(_) | AuthError::BadCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AuthError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AuthError::Password(_) | AuthError::Token(_) | AuthError::DatabaseError(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

impl From<RentalError> for ApiError {
    fn from(err: RentalError) -> Self {
        match err {
            RentalError::NotFound(_) | RentalError::PictureNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            RentalError::NotOwner(_) => ApiError::Forbidden(err.to_string()),
            RentalError::InvalidRentalId(_)
            | RentalError::InvalidName(_)
            | RentalError::InvalidSurface(_)
            | RentalError::InvalidPrice(_)
            | RentalError::InvalidPicture(_) => ApiError::UnprocessableEntity(err.to_string()),
            RentalError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<MessageError> for ApiError {
    fn from(err: MessageError) -> Self {
        match err {
            // An unknown rental on message send is a client error against
            // /api/messages, not a missing resource.
            MessageError::RentalNotFound(_) => ApiError::BadRequest("Rental not found".to_string()),
            MessageError::InvalidMessageId(_) | MessageError::InvalidContent(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            MessageError::DatabaseError(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

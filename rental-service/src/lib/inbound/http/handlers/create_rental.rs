use axum::extract::Multipart;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::rental::errors::PictureError;
use crate::domain::rental::errors::PriceError;
use crate::domain::rental::errors::RentalNameError;
use crate::domain::rental::errors::SurfaceError;
use crate::domain::rental::models::CreateRentalCommand;
use crate::domain::rental::models::Price;
use crate::domain::rental::models::RentalName;
use crate::domain::rental::models::RentalPicture;
use crate::domain::rental::models::Surface;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn create_rental(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    multipart: Multipart,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<RentalCreatedResponse>), ApiError> {
    let command = parse_multipart(multipart).await?;

    let rental = state
        .rental_service
        .create_rental(user.user_id, command)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/rentals/{}", rental.id))],
        Json(RentalCreatedResponse {
            message: "Rental created !".to_string(),
            id: rental.id.to_string(),
        }),
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalCreatedResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateRentalError {
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} must be a number")]
    NotANumber(&'static str),

    #[error("Description must not be blank")]
    BlankDescription,

    #[error("Invalid name: {0}")]
    Name(#[from] RentalNameError),

    #[error("Invalid surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),

    #[error("Invalid picture: {0}")]
    Picture(#[from] PictureError),
}

impl From<ParseCreateRentalError> for ApiError {
    fn from(err: ParseCreateRentalError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Collect the `multipart/form-data` fields into a validated command.
async fn parse_multipart(mut multipart: Multipart) -> Result<CreateRentalCommand, ApiError> {
    let mut name = None;
    let mut surface = None;
    let mut price = None;
    let mut description = None;
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))?
    {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = Some(text(field).await?),
            "surface" => surface = Some(number("surface", text(field).await?)?),
            "price" => price = Some(number("price", text(field).await?)?),
            "description" => description = Some(text(field).await?),
            "picture" => {
                let content_type = field.content_type().unwrap_or_default().to_string();
                let original_filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

                picture = Some(
                    RentalPicture::from_upload(content_type, &original_filename, bytes.to_vec())
                        .map_err(ParseCreateRentalError::from)?,
                );
            }
            other => {
                tracing::debug!(field = other, "Ignoring unknown multipart field");
            }
        }
    }

    let name = RentalName::new(required("name", name)?).map_err(ParseCreateRentalError::from)?;
    let surface = Surface::new(required("surface", surface)?).map_err(ParseCreateRentalError::from)?;
    let price = Price::new(required("price", price)?).map_err(ParseCreateRentalError::from)?;
    let description = required("description", description)?;
    if description.trim().is_empty() {
        return Err(ParseCreateRentalError::BlankDescription.into());
    }

    Ok(CreateRentalCommand {
        name,
        surface,
        price,
        description,
        picture,
    })
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn number(field: &'static str, value: String) -> Result<f64, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ParseCreateRentalError::NotANumber(field).into())
}

fn required<T>(field: &'static str, value: Option<T>) -> Result<T, ApiError> {
    value.ok_or_else(|| ParseCreateRentalError::MissingField(field).into())
}

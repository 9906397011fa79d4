use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use super::StatusMessage;
use crate::domain::rental::errors::PriceError;
use crate::domain::rental::errors::RentalNameError;
use crate::domain::rental::errors::SurfaceError;
use crate::domain::rental::models::Price;
use crate::domain::rental::models::RentalId;
use crate::domain::rental::models::RentalName;
use crate::domain::rental::models::Surface;
use crate::domain::rental::models::UpdateRentalCommand;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn update_rental(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(rental_id): Path<String>,
    Json(body): Json<UpdateRentalRequest>,
) -> Result<Json<StatusMessage>, ApiError> {
    let rental_id =
        RentalId::from_string(&rental_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let command = body.try_into_command()?;

    state
        .rental_service
        .update_rental(&rental_id, user.user_id, command)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(StatusMessage {
        message: "Rental updated !".to_string(),
    }))
}

/// HTTP request body for updating a rental (raw JSON). All fields are
/// replaced; the picture is untouched by this endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateRentalRequest {
    pub name: String,
    pub surface: f64,
    pub price: f64,
    pub description: String,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateRentalError {
    #[error("Description must not be blank")]
    BlankDescription,

    #[error("Invalid name: {0}")]
    Name(#[from] RentalNameError),

    #[error("Invalid surface: {0}")]
    Surface(#[from] SurfaceError),

    #[error("Invalid price: {0}")]
    Price(#[from] PriceError),
}

impl UpdateRentalRequest {
    fn try_into_command(self) -> Result<UpdateRentalCommand, ParseUpdateRentalError> {
        let name = RentalName::new(self.name)?;
        let surface = Surface::new(self.surface)?;
        let price = Price::new(self.price)?;
        if self.description.trim().is_empty() {
            return Err(ParseUpdateRentalError::BlankDescription);
        }

        Ok(UpdateRentalCommand {
            name,
            surface,
            price,
            description: self.description,
        })
    }
}

impl From<ParseUpdateRentalError> for ApiError {
    fn from(err: ParseUpdateRentalError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

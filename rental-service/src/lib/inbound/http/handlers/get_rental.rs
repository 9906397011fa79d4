use axum::extract::Path;
use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::format_date;
use super::picture_url;
use super::ApiError;
use crate::domain::rental::models::Rental;
use crate::domain::rental::models::RentalId;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn get_rental(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(rental_id): Path<String>,
) -> Result<Json<RentalResponseData>, ApiError> {
    let rental_id =
        RentalId::from_string(&rental_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .rental_service
        .get_rental(&rental_id)
        .await
        .map_err(ApiError::from)
        .map(|ref rental| Json(rental.into()))
}

/// Detail view of a rental. `picture` is an array of delivery URLs so the
/// surface can grow to several images without changing shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalResponseData {
    pub id: String,
    pub name: String,
    pub surface: f64,
    pub price: f64,
    pub picture: Vec<String>,
    pub description: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Rental> for RentalResponseData {
    fn from(rental: &Rental) -> Self {
        Self {
            id: rental.id.to_string(),
            name: rental.name.as_str().to_string(),
            surface: rental.surface.value(),
            price: rental.price.value(),
            picture: picture_url(rental).into_iter().collect(),
            description: rental.description.clone(),
            owner_id: rental.owner_id.to_string(),
            created_at: format_date(rental.created_at),
            updated_at: format_date(rental.updated_at),
        }
    }
}

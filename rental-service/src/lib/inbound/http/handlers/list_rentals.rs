use axum::extract::State;
use axum::Json;
use serde::Serialize;

use super::format_date;
use super::picture_url;
use super::ApiError;
use crate::domain::rental::models::Rental;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

pub async fn list_rentals(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<RentalListResponse>, ApiError> {
    let rentals = state
        .rental_service
        .list_rentals()
        .await
        .map_err(ApiError::from)?;

    Ok(Json(RentalListResponse {
        rentals: rentals.iter().map(RentalListItem::from).collect(),
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalListResponse {
    pub rentals: Vec<RentalListItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalListItem {
    pub id: String,
    pub name: String,
    pub surface: f64,
    pub price: f64,
    /// Delivery URL of the stored picture, null when none was uploaded
    pub picture: Option<String>,
    pub description: String,
    pub owner_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Rental> for RentalListItem {
    fn from(rental: &Rental) -> Self {
        Self {
            id: rental.id.to_string(),
            name: rental.name.as_str().to_string(),
            surface: rental.surface.value(),
            price: rental.price.value(),
            picture: picture_url(rental),
            description: rental.description.clone(),
            owner_id: rental.owner_id.to_string(),
            created_at: format_date(rental.created_at),
            updated_at: format_date(rental.updated_at),
        }
    }
}

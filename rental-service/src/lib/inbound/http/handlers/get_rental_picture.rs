use axum::extract::Path;
use axum::extract::State;
use axum::http::header;
use axum::http::HeaderName;
use axum::http::StatusCode;

use super::ApiError;
use crate::domain::rental::models::RentalId;
use crate::inbound::http::router::AppState;

/// Serve a rental's stored picture with its original content type.
///
/// Public on purpose: listing responses embed these URLs and clients render
/// them without credentials.
pub async fn get_rental_picture(
    State(state): State<AppState>,
    Path(rental_id): Path<String>,
) -> Result<(StatusCode, [(HeaderName, String); 2], Vec<u8>), ApiError> {
    let rental_id =
        RentalId::from_string(&rental_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let picture = state
        .rental_service
        .get_rental_picture(&rental_id)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, picture.content_type.clone()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{}\"", picture.filename),
            ),
        ],
        picture.bytes,
    ))
}

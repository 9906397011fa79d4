use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::router::AppState;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponseData>, ApiError> {
    // An unparseable identifier cannot belong to any account; answer with
    // the same generic failure as an unknown one.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let issued = state
        .auth_service
        .login(&email, &body.password)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(LoginResponseData {
        token: issued.token,
        expires_in: issued.expires_in_millis,
    }))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login success body: the bearer token plus its validity in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    #[serde(rename = "expiresIn")]
    pub expires_in: i64,
}

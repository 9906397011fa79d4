use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Identity attached to a request's extensions for its lifetime.
///
/// Presence alone means "authenticated"; there is no capability set because
/// authorization is binary in this system. The value is dropped with the
/// request and never stored anywhere global.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub email: EmailAddress,
}

/// Extractor enforcing authentication on a route.
///
/// Reads the identity the [`authenticate`] middleware attached; absent
/// identity rejects with the same 401 error body every other failure uses.
#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Request authenticator.
///
/// Runs once per inbound request, before any route handler. A request
/// starts unauthenticated and either ends up with an identity in its
/// extensions or passes through unchanged; this middleware never fails a
/// request. Routes that require identity enforce it via the
/// [`AuthenticatedUser`] extractor.
///
/// Steps, in order: take the `Bearer` token from the Authorization header
/// (missing header or other scheme: anonymous pass-through), verify it with
/// the token codec, then re-resolve the subject against the user store.
/// The store round-trip is deliberate: a deleted account loses access on
/// its next request even while its token is still unexpired.
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(token) = bearer_token(&req) else {
        return next.run(req).await;
    };

    let claims = match state.authenticator.validate_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!(reason = %e, "Rejected bearer token");
            return next.run(req).await;
        }
    };

    let email = match EmailAddress::new(claims.sub) {
        Ok(email) => email,
        Err(e) => {
            tracing::warn!(reason = %e, "Token subject is not a usable identifier");
            return next.run(req).await;
        }
    };

    let user = match state.user_service.get_user_by_email(&email).await {
        Ok(user) => user,
        Err(UserError::NotFoundByEmail(_)) => {
            tracing::warn!("Token subject no longer resolves to an account");
            return next.run(req).await;
        }
        Err(e) => {
            // Lookup infrastructure failures also degrade to anonymous; the
            // route's own authorization check produces the client-visible
            // error.
            tracing::error!(error = %e, "User lookup failed during authentication");
            return next.run(req).await;
        }
    };

    // Guard against duplicate invocation: the first attached identity wins.
    if req.extensions().get::<AuthenticatedUser>().is_none() {
        req.extensions_mut().insert(AuthenticatedUser {
            user_id: user.id,
            email: user.email,
        });
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;

    use super::*;

    fn request_with_authorization(value: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().uri("/api/auth/me");
        if let Some(value) = value {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        builder.body(Body::empty()).unwrap()
    }

    #[test]
    fn test_bearer_token_absent_header() {
        let req = request_with_authorization(None);
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let req = request_with_authorization(Some("Basic dXNlcjpwYXNz"));
        assert_eq!(bearer_token(&req), None);
    }

    #[test]
    fn test_bearer_token_extracts_raw_token() {
        let req = request_with_authorization(Some("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }
}

use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_rental::create_rental;
use super::handlers::get_rental::get_rental;
use super::handlers::get_rental_picture::get_rental_picture;
use super::handlers::get_user::get_user;
use super::handlers::list_rentals::list_rentals;
use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::handlers::send_message::send_message;
use super::handlers::update_rental::update_rental;
use super::middleware::authenticate as auth_middleware;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::message::ports::MessageServicePort;
use crate::domain::rental::models::RentalPicture;
use crate::domain::rental::ports::RentalServicePort;
use crate::domain::user::ports::UserServicePort;

/// Shared application state handed to every handler.
///
/// Services are held as trait objects so the same router can be assembled
/// over Postgres repositories in production and in-memory ones in tests.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub user_service: Arc<dyn UserServicePort>,
    pub rental_service: Arc<dyn RentalServicePort>,
    pub message_service: Arc<dyn MessageServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    // Reachable without identity. The picture route is public so listing
    // clients can embed image URLs directly.
    let public_routes = Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/rentals/:rental_id/picture", get(get_rental_picture));

    // Handlers on these routes take the AuthenticatedUser extractor, which
    // rejects with 401 when the authenticator attached no identity.
    let protected_routes = Router::new()
        .route("/api/auth/me", get(me))
        .route("/api/user/:user_id", get(get_user))
        .route("/api/rentals", get(list_rentals).post(create_rental))
        .route("/api/rentals/:rental_id", get(get_rental).put(update_rental))
        .route("/api/messages", post(send_message));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        // Room for the 5 MiB picture plus the other multipart fields; the
        // domain-level size check is the one that produces a client error.
        .layer(DefaultBodyLimit::max(RentalPicture::MAX_BYTES + 1024 * 1024))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

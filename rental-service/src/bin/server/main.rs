use std::sync::Arc;

use anyhow::Context;
use auth::Authenticator;
use chrono::Duration;
use rental_service::config::Config;
use rental_service::domain::auth::service::AuthService;
use rental_service::domain::message::service::MessageService;
use rental_service::domain::rental::service::RentalService;
use rental_service::domain::user::service::UserService;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use rental_service::outbound::repositories::PostgresMessageRepository;
use rental_service::outbound::repositories::PostgresRentalRepository;
use rental_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// HS256 wants at least 256 bits of key material.
const MIN_SECRET_BYTES: usize = 32;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rental_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "rental-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load().context("Failed to load configuration")?;

    // Misconfigured signing material is fatal here, before any request is
    // ever served.
    anyhow::ensure!(
        config.jwt.secret.len() >= MIN_SECRET_BYTES,
        "jwt.secret must be at least {} bytes",
        MIN_SECRET_BYTES
    );
    anyhow::ensure!(
        config.jwt.expiration_hours > 0,
        "jwt.expiration_hours must be positive"
    );

    tracing::info!(
        http_port = config.server.http_port,
        jwt_expiration_hours = config.jwt.expiration_hours,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to the database")?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(
        config.jwt.secret.as_bytes(),
        Duration::hours(config.jwt.expiration_hours),
    ));

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let rental_repository = Arc::new(PostgresRentalRepository::new(pg_pool.clone()));
    let message_repository = Arc::new(PostgresMessageRepository::new(pg_pool));

    let state = AppState {
        auth_service: Arc::new(AuthService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        user_service: Arc::new(UserService::new(Arc::clone(&user_repository))),
        rental_service: Arc::new(RentalService::new(Arc::clone(&rental_repository))),
        message_service: Arc::new(MessageService::new(
            message_repository,
            Arc::clone(&rental_repository),
        )),
        authenticator,
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    axum::serve(http_listener, create_router(state)).await?;

    Ok(())
}

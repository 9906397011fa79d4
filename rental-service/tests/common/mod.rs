use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use chrono::Duration;
use rental_service::domain::auth::service::AuthService;
use rental_service::domain::message::errors::MessageError;
use rental_service::domain::message::models::Message;
use rental_service::domain::message::ports::MessageRepository;
use rental_service::domain::message::service::MessageService;
use rental_service::domain::rental::errors::RentalError;
use rental_service::domain::rental::models::Rental;
use rental_service::domain::rental::models::RentalId;
use rental_service::domain::rental::models::RentalPicture;
use rental_service::domain::rental::ports::RentalRepository;
use rental_service::domain::rental::service::RentalService;
use rental_service::domain::user::errors::UserError;
use rental_service::domain::user::models::EmailAddress;
use rental_service::domain::user::models::User;
use rental_service::domain::user::models::UserId;
use rental_service::domain::user::ports::UserRepository;
use rental_service::domain::user::service::UserService;
use rental_service::inbound::http::router::create_router;
use rental_service::inbound::http::router::AppState;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns the real router on a random port over
/// in-memory repositories. The repository handles stay accessible so tests
/// can reach behind the HTTP surface (e.g. delete an account).
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub user_repo: Arc<InMemoryUserRepository>,
    pub message_repo: Arc<InMemoryMessageRepository>,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET, Duration::hours(24)));
        let user_repo = Arc::new(InMemoryUserRepository::new());
        let rental_repo = Arc::new(InMemoryRentalRepository::new());
        let message_repo = Arc::new(InMemoryMessageRepository::new());

        let state = AppState {
            auth_service: Arc::new(AuthService::new(
                Arc::clone(&user_repo),
                Arc::clone(&authenticator),
            )),
            user_service: Arc::new(UserService::new(Arc::clone(&user_repo))),
            rental_service: Arc::new(RentalService::new(Arc::clone(&rental_repo))),
            message_service: Arc::new(MessageService::new(
                Arc::clone(&message_repo),
                Arc::clone(&rental_repo),
            )),
            authenticator: Arc::clone(&authenticator),
        };

        let router = create_router(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            authenticator,
            user_repo,
            message_repo,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account through the HTTP surface.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/api/auth/register")
            .json(&serde_json::json!({
                "name": name,
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute register request")
    }

    /// Log in and return the bearer token.
    pub async fn login(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/login")
            .json(&serde_json::json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute login request");

        assert_eq!(response.status(), reqwest::StatusCode::OK, "login failed");

        let body: serde_json::Value = response.json().await.expect("Failed to parse login body");
        body["token"].as_str().expect("No token in body").to_string()
    }

    /// Create a rental with a small PNG picture; returns its id.
    pub async fn create_rental_with_picture(&self, token: &str) -> String {
        let form = reqwest::multipart::Form::new()
            .text("name", "Villa by the sea")
            .text("surface", "120.5")
            .text("price", "2500")
            .text("description", "Beautiful villa with sea view")
            .part(
                "picture",
                reqwest::multipart::Part::bytes(png_bytes())
                    .file_name("villa.png")
                    .mime_str("image/png")
                    .expect("Invalid mime type"),
            );

        let response = self
            .post_authenticated("/api/rentals", token)
            .multipart(form)
            .send()
            .await
            .expect("Failed to execute create rental request");

        assert_eq!(
            response.status(),
            reqwest::StatusCode::CREATED,
            "create rental failed"
        );

        let body: serde_json::Value = response.json().await.expect("Failed to parse body");
        body["id"].as_str().expect("No id in body").to_string()
    }
}

/// Minimal valid PNG header plus payload, enough to travel as image bytes.
pub fn png_bytes() -> Vec<u8> {
    let mut bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
    bytes.extend_from_slice(&[0u8; 64]);
    bytes
}

/// In-memory user store.
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Drop an account directly, bypassing the HTTP surface.
    pub async fn remove(&self, email: &str) {
        let mut users = self.users.write().await;
        users.retain(|_, user| user.email.as_str() != email);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.id.0, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }
}

/// In-memory rental store.
pub struct InMemoryRentalRepository {
    rentals: RwLock<HashMap<Uuid, (Rental, Option<RentalPicture>)>>,
}

impl InMemoryRentalRepository {
    pub fn new() -> Self {
        Self {
            rentals: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentalRepository {
    async fn create(
        &self,
        rental: Rental,
        picture: Option<RentalPicture>,
    ) -> Result<Rental, RentalError> {
        self.rentals
            .write()
            .await
            .insert(rental.id.0, (rental.clone(), picture));
        Ok(rental)
    }

    async fn find_by_id(&self, id: &RentalId) -> Result<Option<Rental>, RentalError> {
        Ok(self
            .rentals
            .read()
            .await
            .get(&id.0)
            .map(|(rental, _)| rental.clone()))
    }

    async fn list_all(&self) -> Result<Vec<Rental>, RentalError> {
        let mut rentals: Vec<Rental> = self
            .rentals
            .read()
            .await
            .values()
            .map(|(rental, _)| rental.clone())
            .collect();
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rentals)
    }

    async fn update(&self, rental: Rental) -> Result<Rental, RentalError> {
        let mut rentals = self.rentals.write().await;
        match rentals.get_mut(&rental.id.0) {
            Some(entry) => {
                entry.0 = rental.clone();
                Ok(rental)
            }
            None => Err(RentalError::NotFound(rental.id.to_string())),
        }
    }

    async fn find_picture(&self, id: &RentalId) -> Result<Option<RentalPicture>, RentalError> {
        Ok(self
            .rentals
            .read()
            .await
            .get(&id.0)
            .and_then(|(_, picture)| picture.clone()))
    }
}

/// In-memory message store with an accessor for assertions.
pub struct InMemoryMessageRepository {
    messages: RwLock<Vec<Message>>,
}

impl InMemoryMessageRepository {
    pub fn new() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }

    pub async fn all(&self) -> Vec<Message> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(&self, message: Message) -> Result<Message, MessageError> {
        self.messages.write().await.push(message.clone());
        Ok(message)
    }
}

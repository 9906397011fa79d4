use async_trait::async_trait;
use auth::IssuedToken;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::User;

/// Port for the login and registration flows.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `IdentifierNotFound` - No account for this email
    /// * `BadCredentials` - Password does not match the stored hash
    /// * `DatabaseError` - Lookup failed
    async fn login(&self, email: &EmailAddress, password: &str)
        -> Result<IssuedToken, AuthError>;

    /// Create a new account. Does not issue a token: login is a separate
    /// step.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Persistence failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;
}

use chrono::Duration;
use chrono::Utc;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Process-wide authentication facade combining password hashing and the
/// token codec.
///
/// Built once at startup from the signing secret and the configured token
/// validity; read-only afterwards, so it is shared behind an `Arc` across
/// concurrent requests without locking.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// A freshly issued token together with its validity window, as reported
/// back to the logging-in client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed bearer token
    pub token: String,
    /// Milliseconds until the token expires
    pub expires_in_millis: i64,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_validity` - Window from issue instant to token expiry
    pub fn new(jwt_secret: &[u8], token_validity: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, token_validity),
        }
    }

    /// Hash a password for storage.
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// `Ok(false)` is a wrong password; `Err` means the stored hash itself
    /// could not be processed.
    pub fn verify_password(
        &self,
        password: &str,
        stored_hash: &str,
    ) -> Result<bool, PasswordError> {
        self.password_hasher.verify(password, stored_hash)
    }

    /// Issue a signed token for `subject`, valid from now.
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        let token = self.jwt_handler.encode_for_subject(subject, Utc::now())?;

        Ok(IssuedToken {
            token,
            expires_in_millis: self.jwt_handler.validity_millis(),
        })
    }

    /// Verify a candidate token and return its claims.
    ///
    /// # Errors
    /// * `JwtError` - Malformed, tampered, or expired token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.decode(token)
    }
}

use thiserror::Error;

use crate::domain::user::errors::UserError;

/// Error for registration password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Top-level error for login and registration.
///
/// `IdentifierNotFound` and `BadCredentials` stay distinct here so logs and
/// tests can tell them apart; the HTTP boundary collapses both into one
/// generic authentication failure so callers cannot probe which emails are
/// registered.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No account for identifier: {0}")]
    IdentifierNotFound(String),

    #[error("Password does not match")]
    BadCredentials,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Password processing error: {0}")]
    Password(#[from] auth::PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] auth::JwtError),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            other => AuthError::DatabaseError(other.to_string()),
        }
    }
}

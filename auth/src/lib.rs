//! Authentication infrastructure library
//!
//! Reusable building blocks for stateless bearer-token authentication:
//! - Password hashing (Argon2id)
//! - Signed, time-bounded token encoding and verification
//! - A process-wide authenticator facade combining the two
//!
//! The library knows nothing about users, storage, or HTTP. Services adapt
//! these pieces behind their own domain traits.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use chrono::Duration;
//! use auth::JwtHandler;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//! let token = handler.encode_for_subject("john.doe@example.com", chrono::Utc::now()).unwrap();
//! let claims = handler.decode(&token).unwrap();
//! assert_eq!(claims.sub, "john.doe@example.com");
//! ```
//!
//! ## Complete Flow
//! ```
//! use chrono::Duration;
//! use auth::Authenticator;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::hours(24));
//!
//! // Register: hash the password for storage
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify, then issue
//! assert!(auth.verify_password("password123", &hash).unwrap());
//! let issued = auth.issue_token("john.doe@example.com").unwrap();
//!
//! // Subsequent requests: validate
//! let claims = auth.validate_token(&issued.token).unwrap();
//! assert_eq!(claims.sub, "john.doe@example.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use authenticator::IssuedToken;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;

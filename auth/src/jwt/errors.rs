use thiserror::Error;

/// Error type for token encode/decode operations.
///
/// The three decode failures are deliberately distinct variants: callers
/// that reject a token do not care which one occurred, but logs and tests
/// must be able to tell tampering, expiry, and garbage apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is structurally invalid: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    Expired,
}

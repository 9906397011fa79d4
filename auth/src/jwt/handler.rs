use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Token codec: encodes and verifies signed, time-bounded tokens.
///
/// Uses HS256 (HMAC with SHA-256) keyed by a process-wide secret. The
/// validity duration is fixed at construction; encoding is then a pure
/// function of the subject, the extra claims, and the issue instant.
///
/// No server-side record of issued tokens exists. Validity is fully
/// determined by the token's own signed contents plus current time.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validity: Duration,
}

impl JwtHandler {
    /// Create a new token codec.
    ///
    /// # Arguments
    /// * `secret` - Signing secret; at least 256 bits (32 bytes) for HS256.
    ///   Load it from configuration, never hardcode it.
    /// * `validity` - Window from issue instant to expiry.
    pub fn new(secret: &[u8], validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            validity,
        }
    }

    /// Length of the validity window in milliseconds, as reported to
    /// clients alongside a fresh token.
    pub fn validity_millis(&self) -> i64 {
        self.validity.num_milliseconds()
    }

    /// Encode a signed token for `subject`, issued at `now`.
    ///
    /// The expiry is always `now + validity`. No side effects; identical
    /// inputs produce an identical token.
    ///
    /// # Errors
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Convenience wrapper building the claims and encoding them in one go.
    pub fn encode_for_subject(
        &self,
        subject: &str,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        self.encode(&Claims::issued_at(subject, now, self.validity))
    }

    /// Decode and verify a candidate token.
    ///
    /// The signature is verified before any claim is inspected, so tampered
    /// tokens are rejected without their contents being trusted for
    /// anything. Expiry is then checked with zero leeway.
    ///
    /// # Errors
    /// * `Malformed` - Not a structurally valid token (bad segments,
    ///   undecodable payload, missing mandatory claims)
    /// * `InvalidSignature` - Signature does not match (tampering or a
    ///   token signed under a different key)
    /// * `Expired` - Past the validity window
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::Malformed(e.to_string()),
            })?;

        // The library keeps a token alive through its expiry second; expiry
        // here is exclusive, so the boundary instant is rejected as well.
        if token_data.claims.is_expired(Utc::now()) {
            return Err(JwtError::Expired);
        }

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"my_secret_key_at_least_32_bytes_long!";

    fn handler() -> JwtHandler {
        JwtHandler::new(SECRET, Duration::hours(24))
    }

    #[test]
    fn test_encode_and_decode_round_trip() {
        let handler = handler();
        let claims = Claims::issued_at("john.doe@example.com", Utc::now(), Duration::hours(24))
            .with_extra("device", "mobile");

        let token = handler.encode(&claims).expect("Failed to encode token");
        assert!(!token.is_empty());
        assert_eq!(token.split('.').count(), 3);
        assert!(!token.contains(char::is_whitespace));

        let decoded = handler.decode(&token).expect("Failed to decode token");
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_garbage_is_malformed() {
        let handler = handler();

        let result = handler.decode("definitely-not-a-token");
        assert!(matches!(result, Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_decode_with_wrong_secret_is_invalid_signature() {
        let handler1 = JwtHandler::new(b"secret1_at_least_32_bytes_long_key!", Duration::hours(1));
        let handler2 = JwtHandler::new(b"secret2_at_least_32_bytes_long_key!", Duration::hours(1));

        let token = handler1
            .encode_for_subject("user123", Utc::now())
            .expect("Failed to encode token");

        let result = handler2.decode(&token);
        assert_eq!(result, Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_mutated_signature_segment_is_invalid_signature() {
        let handler = handler();
        let token = handler
            .encode_for_subject("user123", Utc::now())
            .expect("Failed to encode token");

        // Swap one character of the signature segment for a different
        // base64url character, keeping the segment decodable.
        let signature_start = token.rfind('.').unwrap() + 1;
        let mut chars: Vec<char> = token.chars().collect();
        for i in signature_start..chars.len() {
            let replacement = if chars[i] == 'A' { 'B' } else { 'A' };
            if chars[i] != replacement {
                chars[i] = replacement;
                break;
            }
        }
        let tampered: String = chars.into_iter().collect();
        assert_ne!(tampered, token);

        assert_eq!(handler.decode(&tampered), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_decode_expired_token() {
        let handler = handler();

        // Issued 48 hours ago with a 24 hour validity: expired now.
        let issued = Utc::now() - Duration::hours(48);
        let token = handler
            .encode_for_subject("user123", issued)
            .expect("Failed to encode token");

        assert_eq!(handler.decode(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_decode_rejects_token_without_expiry() {
        let handler = handler();

        // Hand-roll a payload missing `exp`; the codec never issues one.
        #[derive(serde::Serialize)]
        struct NoExpiry {
            sub: String,
            iat: i64,
        }
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &NoExpiry {
                sub: "user123".to_string(),
                iat: Utc::now().timestamp(),
            },
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(handler.decode(&token), Err(JwtError::Malformed(_))));
    }

    #[test]
    fn test_validity_millis() {
        assert_eq!(handler().validity_millis(), 86_400_000);
    }
}
